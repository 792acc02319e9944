//! Deployment sequence
//!
//! The lab run, start to finish: load the trainee's config, check the
//! cluster, install the chart, capture its status, render the results page
//! and republish the chart with the page embedded. Every step blocks until
//! the previous one is done.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use labkit_core::LabConfig;
use tracing::{info, warn};

use crate::cluster::ClusterCommand;
use crate::config::Config;
use crate::console;
use crate::error::DriverError;
use crate::page::{self, PageContext};
use crate::runner::{CommandOutput, CommandRunner, OnFailure, execute};

/// Default wait between the first install and the status queries
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(5);

/// Knobs for a deploy run
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Make the status queries fatal as well
    pub strict: bool,

    /// Fixed wait before querying status. This is not a readiness check:
    /// pods that take longer show up as pending or missing on the page.
    pub settle_delay: Duration,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            strict: false,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

/// How a run ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No `config.json`; nothing was run
    ConfigMissing,
    /// The page is published
    Deployed,
}

/// Text block shown on the page and sent to the collector
pub fn format_status(pods: &str, services: &str) -> String {
    format!("--- PODS ---\n{}\n--- SERVICES ---\n{}", pods, services)
}

/// One lab deployment against a command runner
pub struct Deployment<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    config: &'a Config,
}

impl<'a, R: CommandRunner + ?Sized> Deployment<'a, R> {
    pub fn new(runner: &'a R, config: &'a Config) -> Self {
        Self { runner, config }
    }

    /// Run the full sequence
    pub async fn run(&self, options: &DeployOptions) -> Result<Outcome, DriverError> {
        let Some(lab) = self.load_lab_config()? else {
            return Ok(Outcome::ConfigMissing);
        };

        console::starting(&lab.trainee_name);
        info!(
            "Deploying {} into namespace {} for {}",
            self.config.release, self.config.namespace, lab.trainee_name
        );

        self.check_cluster()?;
        self.ensure_namespace()?;

        console::step("Déploiement initial de l'application via HELM...");
        self.install()?;

        console::step("Attente de la création des ressources...");
        tokio::time::sleep(options.settle_delay).await;

        console::step("Récupération des informations du cluster...");
        let on_failure = if options.strict {
            OnFailure::Abort
        } else {
            OnFailure::Continue
        };
        let status = self.capture_status(on_failure)?;

        let collector_url = lab.collector_url();
        let page = page::render(&PageContext {
            title: page::DEFAULT_TITLE,
            trainee_name: &lab.trainee_name,
            cluster_status: &status,
            collector_url: &collector_url,
        });

        console::step("Mise à jour de la page web avec les données du cluster...");
        self.publish(&page)?;

        console::deployed(&self.config.namespace);
        Ok(Outcome::Deployed)
    }

    /// Load `config.json` from the lab directory
    ///
    /// Prints the missing-config message and returns `None` when absent.
    pub fn load_lab_config(&self) -> Result<Option<LabConfig>, DriverError> {
        let lab = LabConfig::load(&self.config.lab_dir)?;
        if lab.is_none() {
            warn!("No {} in {}", LabConfig::FILE_NAME, self.config.lab_dir.display());
            console::config_missing();
        }
        Ok(lab)
    }

    /// Probe the cluster before touching it
    pub fn check_cluster(&self) -> Result<(), DriverError> {
        console::step("Vérification de la connexion au cluster...");

        let invocation = ClusterCommand::ClusterInfo.invocation();
        let output = self
            .runner
            .run(&invocation)
            .unwrap_or_else(|e| CommandOutput::spawn_failure(&e));

        if output.success() {
            return Ok(());
        }

        let detail = output.combined();
        console::cluster_unreachable(&detail);
        Err(DriverError::ClusterUnreachable(detail.trim().to_string()))
    }

    /// Create the namespace, or leave it as is if it already exists
    pub fn ensure_namespace(&self) -> Result<(), DriverError> {
        let manifest = execute(
            self.runner,
            &ClusterCommand::RenderNamespace {
                namespace: self.config.namespace.clone(),
            },
            OnFailure::Abort,
        )?;

        execute(
            self.runner,
            &ClusterCommand::ApplyManifest { manifest },
            OnFailure::Abort,
        )?;

        Ok(())
    }

    fn helm_upgrade(&self, index_html: Option<PathBuf>) -> ClusterCommand {
        ClusterCommand::HelmUpgrade {
            release: self.config.release.clone(),
            chart: self.config.chart.clone(),
            namespace: self.config.namespace.clone(),
            index_html,
        }
    }

    /// First install, with the chart's default page
    pub fn install(&self) -> Result<(), DriverError> {
        execute(self.runner, &self.helm_upgrade(None), OnFailure::Abort)?;
        Ok(())
    }

    /// Capture pods and services of the namespace
    pub fn capture_status(&self, on_failure: OnFailure) -> Result<String, DriverError> {
        let namespace = self.config.namespace.clone();

        let pods = execute(
            self.runner,
            &ClusterCommand::GetPods {
                namespace: namespace.clone(),
            },
            on_failure,
        )?;
        let services = execute(
            self.runner,
            &ClusterCommand::GetServices { namespace },
            on_failure,
        )?;

        Ok(format_status(&pods, &services))
    }

    /// Republish the chart with `page` as its served content
    ///
    /// The page goes through a temporary file in the lab directory, which is
    /// removed whether or not helm succeeds.
    pub fn publish(&self, page: &str) -> Result<(), DriverError> {
        let mut page_file = tempfile::Builder::new()
            .prefix("index.html.")
            .suffix(".tmp")
            .tempfile_in(&self.config.lab_dir)?;
        page_file.write_all(page.as_bytes())?;
        page_file.flush()?;

        // Commands run from the lab directory, so the bare file name is enough.
        let file_name = page_file.path().file_name().map(PathBuf::from).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "temporary page file has no file name",
            )
        })?;

        let result = execute(
            self.runner,
            &self.helm_upgrade(Some(file_name)),
            OnFailure::Abort,
        );

        if let Err(e) = page_file.close() {
            warn!("Failed to remove temporary page file: {}", e);
        }

        result.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{DEFAULT_CHART, DEFAULT_NAMESPACE, DEFAULT_RELEASE};
    use crate::testing::ScriptedRunner;

    const REPUBLISH: &str = "helm upgrade --install mon-app ./app-chart -n mon-application --set namespace=mon-application --set-file";
    const NAMESPACE_MANIFEST: &str = "apiVersion: v1\nkind: Namespace\nmetadata:\n  name: mon-application\n";

    fn lab_dir_with_config() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.json"),
            r#"{"formateur_ip": "10.0.0.1", "formateur_port": 8080, "stagiaire_nom": "Alice"}"#,
        )
        .unwrap();
        dir
    }

    fn config_for(dir: &tempfile::TempDir) -> Config {
        Config {
            lab_dir: dir.path().to_path_buf(),
            namespace: DEFAULT_NAMESPACE.parse().unwrap(),
            release: DEFAULT_RELEASE.parse().unwrap(),
            chart: DEFAULT_CHART.to_string(),
        }
    }

    fn options() -> DeployOptions {
        DeployOptions {
            strict: false,
            settle_delay: Duration::ZERO,
        }
    }

    fn healthy_cluster(dir: &tempfile::TempDir) -> ScriptedRunner {
        ScriptedRunner::in_dir(dir.path())
            .on("kubectl cluster-info", ScriptedRunner::ok("Kubernetes control plane is running"))
            .on("kubectl create namespace", ScriptedRunner::ok(NAMESPACE_MANIFEST))
            .on("kubectl apply", ScriptedRunner::ok("namespace/mon-application configured"))
            .on("helm upgrade", ScriptedRunner::ok("Release \"mon-app\" has been upgraded."))
            .on("kubectl get pods", ScriptedRunner::ok("nginx-abc 1/1 Running"))
            .on("kubectl get svc", ScriptedRunner::ok("nginx-service ClusterIP"))
    }

    fn leftover_files(dir: &tempfile::TempDir) -> Vec<String> {
        std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .filter(|name| name != "config.json")
            .collect()
    }

    #[tokio::test]
    async fn test_missing_config_runs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir);
        let runner = healthy_cluster(&dir);

        let outcome = Deployment::new(&runner, &config).run(&options()).await.unwrap();

        assert_eq!(outcome, Outcome::ConfigMissing);
        assert!(runner.commands().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{").unwrap();
        let config = config_for(&dir);
        let runner = healthy_cluster(&dir);

        let err = Deployment::new(&runner, &config).run(&options()).await.unwrap_err();

        assert!(matches!(err, DriverError::Config(_)));
        assert!(runner.commands().is_empty());
    }

    #[tokio::test]
    async fn test_full_sequence_order() {
        let dir = lab_dir_with_config();
        let config = config_for(&dir);
        let runner = healthy_cluster(&dir);

        let outcome = Deployment::new(&runner, &config).run(&options()).await.unwrap();
        assert_eq!(outcome, Outcome::Deployed);

        let commands = runner.commands();
        assert_eq!(commands.len(), 7);
        assert_eq!(commands[0], "kubectl cluster-info");
        assert_eq!(
            commands[1],
            "kubectl create namespace mon-application --dry-run=client -o yaml"
        );
        assert_eq!(commands[2], "kubectl apply -f -");
        assert_eq!(
            commands[3],
            "helm upgrade --install mon-app ./app-chart -n mon-application --set namespace=mon-application"
        );
        assert_eq!(commands[4], "kubectl get pods -n mon-application");
        assert_eq!(commands[5], "kubectl get svc -n mon-application");
        assert!(commands[6].starts_with(REPUBLISH));
    }

    #[tokio::test]
    async fn test_namespace_manifest_is_piped_to_apply() {
        let dir = lab_dir_with_config();
        let config = config_for(&dir);
        let runner = healthy_cluster(&dir);

        Deployment::new(&runner, &config).run(&options()).await.unwrap();

        let apply = &runner.calls()[2].invocation;
        assert_eq!(apply.stdin.as_deref(), Some(NAMESPACE_MANIFEST));
    }

    #[tokio::test]
    async fn test_published_page_embeds_status() {
        let dir = lab_dir_with_config();
        let config = config_for(&dir);
        let runner = healthy_cluster(&dir);

        Deployment::new(&runner, &config).run(&options()).await.unwrap();

        let calls = runner.calls();
        let page = calls.last().unwrap().page.as_deref().unwrap();
        assert!(page.contains("<strong>Alice</strong>"));
        assert!(page.contains(
            "<pre>--- PODS ---\nnginx-abc 1/1 Running\n--- SERVICES ---\nnginx-service ClusterIP</pre>"
        ));
        assert!(page.contains(r#"fetch("http://10.0.0.1:8080/", {"#));
        assert!(leftover_files(&dir).is_empty());
    }

    #[tokio::test]
    async fn test_page_file_is_passed_relative_to_lab_dir() {
        let dir = tempfile::tempdir().unwrap();
        let lab_dir = dir.path().join("lab,with,commas");
        std::fs::create_dir(&lab_dir).unwrap();
        std::fs::write(
            lab_dir.join("config.json"),
            r#"{"formateur_ip": "10.0.0.1", "formateur_port": 8080, "stagiaire_nom": "Alice"}"#,
        )
        .unwrap();

        let config = Config {
            lab_dir: lab_dir.clone(),
            ..config_for(&dir)
        };
        let runner = ScriptedRunner::in_dir(&lab_dir)
            .on("kubectl", ScriptedRunner::ok(""))
            .on("helm upgrade", ScriptedRunner::ok(""));

        Deployment::new(&runner, &config).run(&options()).await.unwrap();

        let calls = runner.calls();
        let republish = calls.last().unwrap();
        let value = republish.invocation.args.last().unwrap();
        let file_name = value.strip_prefix("indexHtml=index.html.").unwrap();
        assert!(file_name.ends_with(".tmp"));
        assert!(!file_name.contains('/') && !file_name.contains(','));
        assert!(republish.page.is_some());
    }

    #[tokio::test]
    async fn test_unreachable_cluster_stops_before_deploying() {
        let dir = lab_dir_with_config();
        let config = config_for(&dir);
        let runner = ScriptedRunner::in_dir(dir.path()).on(
            "kubectl cluster-info",
            ScriptedRunner::failed(1, "", "The connection to the server localhost:8080 was refused"),
        );

        let err = Deployment::new(&runner, &config).run(&options()).await.unwrap_err();

        assert!(matches!(err, DriverError::ClusterUnreachable(ref d) if d.contains("refused")));
        assert_eq!(runner.commands(), ["kubectl cluster-info"]);
    }

    #[tokio::test]
    async fn test_failed_install_is_fatal() {
        let dir = lab_dir_with_config();
        let config = config_for(&dir);
        let runner = ScriptedRunner::in_dir(dir.path())
            .on("kubectl cluster-info", ScriptedRunner::ok(""))
            .on("kubectl create namespace", ScriptedRunner::ok(NAMESPACE_MANIFEST))
            .on("kubectl apply", ScriptedRunner::ok(""))
            .on("helm upgrade", ScriptedRunner::failed(1, "", "Error: chart not found"))
            .on("kubectl get", ScriptedRunner::ok("should not run"));

        let err = Deployment::new(&runner, &config).run(&options()).await.unwrap_err();

        assert!(matches!(err, DriverError::CommandFailed { .. }));
        let commands = runner.commands();
        assert_eq!(commands.len(), 4);
        assert!(commands.iter().all(|c| !c.starts_with("kubectl get")));
        assert!(leftover_files(&dir).is_empty());
    }

    #[tokio::test]
    async fn test_failed_status_queries_still_publish() {
        let dir = lab_dir_with_config();
        let config = config_for(&dir);
        let runner = ScriptedRunner::in_dir(dir.path())
            .on("kubectl cluster-info", ScriptedRunner::ok(""))
            .on("kubectl create namespace", ScriptedRunner::ok(NAMESPACE_MANIFEST))
            .on("kubectl apply", ScriptedRunner::ok(""))
            .on("helm upgrade", ScriptedRunner::ok(""))
            .on("kubectl get pods", ScriptedRunner::failed(1, "", "forbidden"))
            .on("kubectl get svc", ScriptedRunner::ok("nginx-service ClusterIP"));

        let outcome = Deployment::new(&runner, &config).run(&options()).await.unwrap();
        assert_eq!(outcome, Outcome::Deployed);

        let calls = runner.calls();
        let page = calls.last().unwrap().page.as_deref().unwrap();
        assert!(page.contains("<pre>--- PODS ---\n\n--- SERVICES ---\nnginx-service ClusterIP</pre>"));
    }

    #[tokio::test]
    async fn test_strict_mode_aborts_on_status_failure() {
        let dir = lab_dir_with_config();
        let config = config_for(&dir);
        let runner = ScriptedRunner::in_dir(dir.path())
            .on("kubectl cluster-info", ScriptedRunner::ok(""))
            .on("kubectl create namespace", ScriptedRunner::ok(NAMESPACE_MANIFEST))
            .on("kubectl apply", ScriptedRunner::ok(""))
            .on("helm upgrade", ScriptedRunner::ok(""))
            .on("kubectl get pods", ScriptedRunner::failed(1, "", "forbidden"));

        let strict = DeployOptions {
            strict: true,
            ..options()
        };
        let err = Deployment::new(&runner, &config).run(&strict).await.unwrap_err();

        assert!(matches!(err, DriverError::CommandFailed { .. }));
        assert!(runner.commands().iter().all(|c| !c.starts_with(REPUBLISH)));
    }

    #[tokio::test]
    async fn test_failed_republish_removes_page_file() {
        let dir = lab_dir_with_config();
        let config = config_for(&dir);
        let runner = ScriptedRunner::in_dir(dir.path())
            .on("kubectl cluster-info", ScriptedRunner::ok(""))
            .on("kubectl create namespace", ScriptedRunner::ok(NAMESPACE_MANIFEST))
            .on("kubectl apply", ScriptedRunner::ok(""))
            .on(REPUBLISH, ScriptedRunner::failed(1, "", "Error: UPGRADE FAILED"))
            .on("helm upgrade", ScriptedRunner::ok(""))
            .on("kubectl get", ScriptedRunner::ok(""));

        let err = Deployment::new(&runner, &config).run(&options()).await.unwrap_err();

        assert!(matches!(err, DriverError::CommandFailed { .. }));
        // The page existed while helm ran, and is gone afterwards.
        assert!(runner.calls().last().unwrap().page.is_some());
        assert!(leftover_files(&dir).is_empty());
    }

    #[test]
    fn test_format_status() {
        assert_eq!(
            format_status("pods\n", "svc\n"),
            "--- PODS ---\npods\n\n--- SERVICES ---\nsvc\n"
        );
    }
}
