//! `{{name}}` placeholder substitution for command and source templates.
//!
//! Build and test commands are configured as templates with named
//! placeholders (`{{bin}}`, `{{source}}`, `{{test}}`). The same substitution
//! drives the generated entrypoint source. Rendering happens at the boundary
//! with the process runner, never inside the orchestration logic, so the
//! command a descriptor produces stays a value until it is executed.

use thiserror::Error;

/// Errors that can occur while rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
  /// A `{{` without a matching `}}`.
  #[error("unclosed placeholder at position {0}")]
  Unclosed(usize),

  /// A placeholder name no value was supplied for.
  #[error("unknown placeholder: {0}")]
  Unknown(String),
}

/// Substitute every `{{name}}` in `template` with its value from `vars`.
///
/// Text outside placeholders passes through unchanged; a single `{` needs no
/// escaping. Placeholder names not present in `vars` are an error rather than
/// being left in place, so a typo in a configured command template fails
/// before anything is executed.
pub fn render(template: &str, vars: &[(&str, &str)]) -> Result<String, TemplateError> {
  let mut result = String::with_capacity(template.len());
  let mut rest = template;
  let mut offset = 0;

  while let Some(start) = rest.find("{{") {
    result.push_str(&rest[..start]);

    let after = &rest[start + 2..];
    let end = after.find("}}").ok_or(TemplateError::Unclosed(offset + start))?;
    let name = &after[..end];

    let value = vars
      .iter()
      .find(|(key, _)| *key == name)
      .map(|(_, value)| *value)
      .ok_or_else(|| TemplateError::Unknown(name.to_string()))?;
    result.push_str(value);

    offset += start + 2 + end + 2;
    rest = &after[end + 2..];
  }

  result.push_str(rest);
  Ok(result)
}

/// A command template plus the values for its placeholders.
///
/// Orchestration assembles these as plain values; the rendered string only
/// exists right where it is handed to the process runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
  template: String,
  vars: Vec<(&'static str, String)>,
}

impl CommandSpec {
  pub fn new(template: impl Into<String>) -> Self {
    Self {
      template: template.into(),
      vars: Vec::new(),
    }
  }

  /// Build a spec from an environment prefix and a command template.
  ///
  /// The prefix (e.g. `env GOOS=linux`) is joined with a single space; an
  /// empty prefix leaves the template untouched.
  pub fn prefixed(prefix: &str, template: &str) -> Self {
    if prefix.is_empty() {
      Self::new(template)
    } else {
      Self::new(format!("{} {}", prefix, template))
    }
  }

  /// Supply the value for one placeholder.
  pub fn var(mut self, name: &'static str, value: impl Into<String>) -> Self {
    self.vars.push((name, value.into()));
    self
  }

  /// Render the final command string.
  pub fn render(&self) -> Result<String, TemplateError> {
    let vars: Vec<(&str, &str)> = self.vars.iter().map(|(name, value)| (*name, value.as_str())).collect();
    render(&self.template, &vars)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn literal_text_passes_through() {
    assert_eq!(render("go test ./...", &[]).unwrap(), "go test ./...");
  }

  #[test]
  fn substitutes_named_placeholders() {
    let result = render(
      "go build -o {{bin}} {{source}}",
      &[("bin", "bin/widget"), ("source", "widget.go")],
    )
    .unwrap();
    assert_eq!(result, "go build -o bin/widget widget.go");
  }

  #[test]
  fn repeated_placeholder_substituted_each_time() {
    let result = render("{{x}} and {{x}}", &[("x", "a")]).unwrap();
    assert_eq!(result, "a and a");
  }

  #[test]
  fn single_braces_pass_through() {
    let result = render(r#"go build -ldflags="-s -w" -o {out}"#, &[]).unwrap();
    assert_eq!(result, r#"go build -ldflags="-s -w" -o {out}"#);
  }

  #[test]
  fn error_unknown_placeholder() {
    let result = render("go build {{missing}}", &[("bin", "x")]);
    assert!(matches!(result, Err(TemplateError::Unknown(ref name)) if name == "missing"));
  }

  #[test]
  fn error_unclosed_placeholder() {
    let result = render("go build {{bin", &[("bin", "x")]);
    assert!(matches!(result, Err(TemplateError::Unclosed(9))));
  }

  #[test]
  fn command_spec_renders_at_boundary() {
    let spec = CommandSpec::prefixed("env GOOS=linux", "go build -o {{bin}} {{source}}")
      .var("bin", "bin/entrypoints/widget")
      .var("source", "entrypoints/widget.go");

    assert_eq!(
      spec.render().unwrap(),
      "env GOOS=linux go build -o bin/entrypoints/widget entrypoints/widget.go"
    );
  }

  #[test]
  fn command_spec_empty_prefix_is_untouched() {
    let spec = CommandSpec::prefixed("", "go test {{test}}").var("test", "./widget/...");
    assert_eq!(spec.render().unwrap(), "go test ./widget/...");
  }
}
