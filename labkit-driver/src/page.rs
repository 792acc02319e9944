//! Results page
//!
//! The page served by the lab workload once deployment is done: the captured
//! cluster status plus a button posting it to the instructor's collector.
//!
//! Values land in two kinds of positions. HTML text is entity-escaped; the
//! inline script receives JSON string literals with `<`, `>` and `&` written as
//! `\u` escapes, so no trainee name or log line can close the `<script>`
//! element or the literal it sits in.

/// Heading of the lab 01 page
pub const DEFAULT_TITLE: &str = "Lab 01 - Déploiement NGINX Terminé";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="UTF-8">
    <title>Validation Lab Kubernetes</title>
    <style>
        body { font-family: sans-serif; text-align: center; padding: 50px; background-color: #f4f4f9; }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); display: inline-block; }
        pre { text-align: left; background: #272822; color: white; padding: 15px; border-radius: 5px; overflow-x: auto; }
        button { background-color: #4CAF50; color: white; padding: 15px 32px; font-size: 16px; border: none; border-radius: 4px; cursor: pointer; }
        button:hover { background-color: #45a049; }
    </style>
</head>
<body>
    <div class="container">
        <h1>{{title}}</h1>
        <p>Stagiaire : <strong>{{trainee_name}}</strong></p>
        <h3>Récapitulatif de votre déploiement :</h3>
        <pre>{{cluster_status}}</pre>
        <br>
        <button onclick="valider()">VALIDER ET ENVOYER AU FORMATEUR</button>
    </div>

    <script>
        function valider() {
            const data = {
                stagiaire: {{trainee_name_js}},
                logs: {{cluster_status_js}}
            };
            fetch({{collector_url_js}}, {
                method: "POST",
                headers: { "Content-Type": "application/json" },
                body: JSON.stringify(data)
            })
            .then(response => {
                if (response.ok) {
                    alert("Succès ! Vos résultats ont été envoyés au formateur.");
                } else {
                    alert("Erreur lors de l'envoi. Vérifiez la connexion au serveur du formateur.");
                }
            })
            .catch(error => {
                console.error("Erreur:", error);
                alert("Erreur réseau : " + error);
            });
        }
    </script>
</body>
</html>
"#;

/// Everything the page shows
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    pub title: &'a str,
    pub trainee_name: &'a str,
    /// Captured `kubectl get` output
    pub cluster_status: &'a str,
    /// Where the button posts, e.g. `http://192.168.1.10:8080/`
    pub collector_url: &'a str,
}

/// Render the results page
pub fn render(context: &PageContext<'_>) -> String {
    fill(TEMPLATE, |key| match key {
        "title" => Some(escape_html(context.title)),
        "trainee_name" => Some(escape_html(context.trainee_name)),
        "cluster_status" => Some(escape_html(context.cluster_status)),
        "trainee_name_js" => Some(js_string_literal(context.trainee_name)),
        "cluster_status_js" => Some(js_string_literal(context.cluster_status)),
        "collector_url_js" => Some(js_string_literal(context.collector_url)),
        _ => None,
    })
}

/// Replace `{{key}}` markers in a single pass
///
/// Substituted text is never rescanned. Unknown keys are left as they are.
fn fill(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = &after[..end];
        match lookup(key) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

/// Escape text for an HTML element body or attribute
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Quote text as a JavaScript string literal safe inside `<script>`
///
/// The result is also a valid JSON string.
pub fn js_string_literal(text: &str) -> String {
    let json = serde_json::Value::String(text.to_string()).to_string();

    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}
