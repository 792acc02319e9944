//! Trainee-facing console output

use colored::*;

use crate::cluster::Namespace;

const BANNER_WIDTH: usize = 60;

/// Service exposed by the lab chart
pub const SERVICE_NAME: &str = "nginx-service";

/// Local port suggested for the port-forward
pub const LOCAL_PORT: u16 = 8081;

pub fn config_missing() {
    println!("{}", "Erreur : config.json non trouvé.".red().bold());
}

pub fn starting(trainee_name: &str) {
    println!("Démarrage du Lab pour {}...", trainee_name.bold());
}

pub fn step(message: &str) {
    println!("{}", message.cyan());
}

pub fn cluster_unreachable(detail: &str) {
    let rule = "=".repeat(BANNER_WIDTH);
    println!();
    println!("{}", rule.red());
    println!("{}", "ERREUR : impossible de joindre le cluster Kubernetes.".red().bold());
    println!("Vérifiez que votre cluster local est démarré");
    println!("et que kubectl utilise le bon contexte :");
    println!("  {}", "kubectl config current-context".cyan());
    if !detail.trim().is_empty() {
        println!();
        println!("Détail : {}", detail.trim().dimmed());
    }
    println!("{}", rule.red());
    println!();
}

/// The command that reaches the deployed page from the trainee's machine
pub fn port_forward_command(namespace: &Namespace) -> String {
    format!(
        "kubectl port-forward svc/{} {}:80 -n {}",
        SERVICE_NAME, LOCAL_PORT, namespace
    )
}

pub fn deployed(namespace: &Namespace) {
    let rule = "=".repeat(BANNER_WIDTH);
    println!();
    println!("{}", rule.green());
    println!("{}", "DÉPLOIEMENT RÉUSSI !".green().bold());
    println!("Pour accéder à votre application, exécutez la commande suivante :");
    println!("{}", port_forward_command(namespace).cyan());
    println!();
    println!(
        "Ensuite, ouvrez votre navigateur sur : {}",
        format!("http://localhost:{}", LOCAL_PORT).cyan()
    );
    println!("{}", rule.green());
    println!();
}
