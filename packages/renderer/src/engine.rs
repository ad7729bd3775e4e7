//! Liquid template engine adapter

use liquid::{Parser, ParserBuilder};
use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

/// A variable path piped straight into the `default` filter
const DEFAULTED_PATH: &str = r"([A-Za-z_][\w-]*(?:\.[A-Za-z_][\w-]*)*)\s*\|\s*default\b";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    #[error("Template parse error: {0}")]
    Parse(String),

    #[error("Template render error: {0}")]
    Render(String),

    #[error("Invalid render context: {0}")]
    Context(String),
}

/// Synchronous Liquid renderer with the standard filter and tag library
pub struct TemplateEngine {
    parser: Parser,
    defaulted_path: Regex,
}

impl TemplateEngine {
    pub fn new() -> Result<Self, TemplateError> {
        let parser = ParserBuilder::with_stdlib()
            .build()
            .map_err(|e| TemplateError::Parse(e.to_string()))?;
        let defaulted_path = Regex::new(DEFAULTED_PATH).map_err(|e| TemplateError::Parse(e.to_string()))?;
        Ok(Self { parser, defaulted_path })
    }

    /// Render `template` against a JSON object context.
    ///
    /// Neither input is modified. Unknown variables are an error, except for
    /// paths piped straight into `default` (`{{ data.title | default: 'Hi' }}`),
    /// which resolve to nil so the filter's fallback applies.
    pub fn render(&self, template: &str, context: &Value) -> Result<String, TemplateError> {
        let parsed = self
            .parser
            .parse(template)
            .map_err(|e| TemplateError::Parse(e.to_string()))?;

        let mut seeded = match context {
            Value::Object(object) => object.clone(),
            other => return Err(TemplateError::Context(format!("expected an object, got {}", other))),
        };
        for captures in self.defaulted_path.captures_iter(template) {
            seed_missing(&mut seeded, &captures[1]);
        }

        let globals =
            liquid::to_object(&Value::Object(seeded)).map_err(|e| TemplateError::Context(e.to_string()))?;

        parsed
            .render(&globals)
            .map_err(|e| TemplateError::Render(e.to_string()))
    }

    /// Parse only, without rendering
    pub fn check(&self, template: &str) -> Result<(), TemplateError> {
        self.parser
            .parse(template)
            .map(|_| ())
            .map_err(|e| TemplateError::Parse(e.to_string()))
    }
}

/// Insert nil at `path` unless something is already there.
///
/// Missing parent objects are created; an existing non-object parent leaves
/// the path alone.
fn seed_missing(globals: &mut Map<String, Value>, path: &str) {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut object = globals;
    for segment in parents {
        let next = object
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        match next {
            Value::Object(inner) => object = inner,
            _ => return,
        }
    }
    object.entry(last.to_string()).or_insert(Value::Null);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn engine() -> TemplateEngine {
        TemplateEngine::new().unwrap()
    }

    #[test]
    fn test_dot_path_interpolation() {
        let html = engine()
            .render("<b>{{ data.title }}</b>", &json!({ "data": { "title": "Top" } }))
            .unwrap();
        assert_eq!(html, "<b>Top</b>");
    }

    #[test]
    fn test_conditionals() {
        let template = "{% if amount > 1000 %}big{% elsif amount > 100 %}medium{% else %}small{% endif %}";
        assert_eq!(engine().render(template, &json!({ "amount": 5000 })).unwrap(), "big");
        assert_eq!(engine().render(template, &json!({ "amount": 500 })).unwrap(), "medium");
        assert_eq!(engine().render(template, &json!({ "amount": 5 })).unwrap(), "small");
    }

    #[test]
    fn test_iteration() {
        let html = engine()
            .render(
                "{% for item in items %}[{{ item }}]{% endfor %}",
                &json!({ "items": ["a", "b", "c"] }),
            )
            .unwrap();
        assert_eq!(html, "[a][b][c]");
    }

    #[test]
    fn test_numeric_filters() {
        let context = json!({ "amount": 1250 });
        assert_eq!(engine().render("{{ amount | divided_by: 100 }}", &context).unwrap(), "12");
        assert_eq!(engine().render("{{ amount | modulo: 100 }}", &context).unwrap(), "50");
        assert_eq!(engine().render("{{ amount | times: 2 }}", &context).unwrap(), "2500");
        assert_eq!(engine().render("{{ amount | minus: 250 }}", &context).unwrap(), "1000");
        assert_eq!(engine().render("{{ 2.567 | round: 1 }}", &context).unwrap(), "2.6");
    }

    #[test]
    fn test_string_filters() {
        let context = json!({ "color": "#FF0000", "name": "" });
        assert_eq!(engine().render("{{ color | remove: '#' }}", &context).unwrap(), "FF0000");
        assert_eq!(
            engine().render("{{ name | default: 'Anonymous' }}", &context).unwrap(),
            "Anonymous"
        );
    }

    #[test]
    fn test_malformed_template_is_an_error() {
        let result = engine().render("{% for x in %}", &json!({}));
        assert!(matches!(result, Err(TemplateError::Parse(_))));
    }

    #[test]
    fn test_default_filter_covers_missing_keys() {
        let context = json!({ "data": {} });
        assert_eq!(
            engine()
                .render("{{ data.headline | default: 'Hi' }}", &context)
                .unwrap(),
            "Hi"
        );
        assert_eq!(
            engine()
                .render("{{ theme.accent | default: '#FFF' }}", &json!({}))
                .unwrap(),
            "#FFF"
        );
        assert_eq!(
            engine()
                .render("{% assign color = data.color | default: 'red' %}{{ color }}", &context)
                .unwrap(),
            "red"
        );
    }

    #[test]
    fn test_default_filter_keeps_present_values() {
        let context = json!({ "data": { "headline": "Welcome" } });
        assert_eq!(
            engine()
                .render("{{ data.headline | default: 'Hi' }}", &context)
                .unwrap(),
            "Welcome"
        );
    }

    #[test]
    fn test_missing_key_without_default_is_an_error() {
        let result = engine().render("{{ data.headline }}", &json!({ "data": {} }));
        assert!(matches!(result, Err(TemplateError::Render(_))));
    }

    #[test]
    fn test_seed_missing_respects_existing_values() {
        let mut globals = Map::new();
        globals.insert("name".to_string(), json!("Ana"));

        seed_missing(&mut globals, "name.first");
        seed_missing(&mut globals, "data.title");
        seed_missing(&mut globals, "name");

        assert_eq!(Value::Object(globals), json!({ "name": "Ana", "data": { "title": null } }));
    }

    #[test]
    fn test_check_only_parses() {
        assert!(engine().check("{{ anything.at.all }}").is_ok());
        assert!(engine().check("{% endfor %}").is_err());
    }

    #[test]
    fn test_render_does_not_modify_context() {
        let context = json!({ "items": [1, 2] });
        let before = context.clone();
        engine()
            .render("{% assign items = 'x' %}{{ items }}", &context)
            .unwrap();
        assert_eq!(context, before);
    }
}
