//! Predeploy packaging rewrite.
//!
//! Once a function is compiled, its descriptor should ship the binary, not
//! the source reference. The rewrite is a pure transform: the caller gets a
//! new descriptor and decides where to put it.

use crate::config::Config;
use crate::entrypoint::output_binary;
use crate::project::{FunctionDescriptor, PackageSpec};

/// Return a copy of `descriptor` pointing at its compiled binary.
///
/// The handler becomes the derived binary path. With `minimize_package`, the
/// packaging spec is rewritten to ship only that binary: everything excluded,
/// the binary (plus any pre-existing includes) included, packaged
/// individually. Descriptors without a handler pass through unchanged.
pub fn prepare_for_packaging(descriptor: &FunctionDescriptor, config: &Config) -> FunctionDescriptor {
  let Some(handler) = descriptor.handler.as_deref() else {
    return descriptor.clone();
  };

  let binary = output_binary(handler, config);
  let mut result = descriptor.clone();
  result.handler = Some(binary.clone());

  if config.minimize_package {
    let existing = descriptor.package.clone().unwrap_or_default();
    let mut include = existing.include;
    if !include.contains(&binary) {
      include.push(binary);
    }

    result.package = Some(PackageSpec {
      individually: Some(true),
      include,
      exclude: vec!["./**".to_string()],
    });
  }

  result
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn handler_is_rewritten_to_binary_path() {
    let config = Config::default();
    let descriptor = FunctionDescriptor::new("widget", "entrypoints/widget.Handle");

    let packaged = prepare_for_packaging(&descriptor, &config);

    assert_eq!(packaged.handler.as_deref(), Some("bin/entrypoints/widget"));
    // The input descriptor is untouched.
    assert_eq!(descriptor.handler.as_deref(), Some("entrypoints/widget.Handle"));
  }

  #[test]
  fn minimized_package_ships_only_the_binary() {
    let config = Config::default();
    let descriptor = FunctionDescriptor::new("widget", "entrypoints/widget.Handle");

    let packaged = prepare_for_packaging(&descriptor, &config);
    let package = packaged.package.unwrap();

    assert_eq!(package.individually, Some(true));
    assert_eq!(package.exclude, vec!["./**".to_string()]);
    assert_eq!(package.include, vec!["bin/entrypoints/widget".to_string()]);
  }

  #[test]
  fn existing_includes_are_preserved() {
    let config = Config::default();
    let mut descriptor = FunctionDescriptor::new("widget", "entrypoints/widget.Handle");
    descriptor.package = Some(PackageSpec {
      individually: None,
      include: vec!["config/prod.json".to_string()],
      exclude: vec!["docs/**".to_string()],
    });

    let package = prepare_for_packaging(&descriptor, &config).package.unwrap();

    assert_eq!(
      package.include,
      vec!["config/prod.json".to_string(), "bin/entrypoints/widget".to_string()]
    );
    // Minimization owns the exclude list.
    assert_eq!(package.exclude, vec!["./**".to_string()]);
  }

  #[test]
  fn minimization_disabled_leaves_package_untouched() {
    let mut config = Config::default();
    config.minimize_package = false;
    let descriptor = FunctionDescriptor::new("widget", "entrypoints/widget.Handle");

    let packaged = prepare_for_packaging(&descriptor, &config);

    assert_eq!(packaged.handler.as_deref(), Some("bin/entrypoints/widget"));
    assert!(packaged.package.is_none());
  }

  #[test]
  fn handlerless_descriptor_passes_through() {
    let config = Config::default();
    let descriptor = FunctionDescriptor {
      name: "container".to_string(),
      handler: None,
      runtime: None,
      package: None,
    };

    assert_eq!(prepare_for_packaging(&descriptor, &config), descriptor);
  }
}
