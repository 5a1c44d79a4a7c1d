use std::sync::LazyLock;

use minijinja::Environment;
use serde::Serialize;

const TRACING_TARGET: &str = "vecscope_server::view";

const TEMPLATES: [(&str, &str); 2] = [
    ("page.html", include_str!("../../templates/page.html")),
    ("table.html", include_str!("../../templates/table.html")),
];

/// Templates compiled once; `.html` names turn on HTML auto-escaping.
static ENVIRONMENT: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut environment = Environment::new();
    for (name, source) in TEMPLATES {
        if let Err(err) = environment.add_template(name, source) {
            tracing::error!(
                target: TRACING_TARGET,
                template = name,
                error = %err,
                "Template failed to compile"
            );
        }
    }
    environment
});

/// Renders the named template with `context`.
pub(super) fn render(name: &str, context: impl Serialize) -> Result<String, minijinja::Error> {
    ENVIRONMENT.get_template(name)?.render(context)
}

#[cfg(test)]
mod tests {
    use minijinja::context;

    use super::*;

    #[test]
    fn every_template_compiles() {
        for (name, _) in TEMPLATES {
            assert!(ENVIRONMENT.get_template(name).is_ok(), "{name} did not compile");
        }
    }

    #[test]
    fn unknown_templates_are_errors() {
        assert!(render("missing.html", context! {}).is_err());
    }
}
