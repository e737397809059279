use oxc::syntax::identifier;

use crate::concat_string;

pub fn is_validate_identifier_name(name: &str) -> bool {
  identifier::is_identifier_name(name)
}

/// A dotted global such as `Acme.Widgets` is valid when every segment is an identifier.
pub fn is_validate_global_name(name: &str) -> bool {
  !name.is_empty() && name.split('.').all(is_validate_identifier_name)
}

pub fn quote_str(value: &str) -> String {
  serde_json::Value::String(value.to_string()).to_string()
}

pub fn property_access_str(obj: &str, prop: &str) -> String {
  if is_validate_identifier_name(prop) {
    concat_string!(obj, ".", prop)
  } else {
    let quoted = quote_str(prop);
    concat_string!(obj, "[", quoted, "]")
  }
}

/// `global` + `Acme.Widgets` -> `global.Acme.Widgets`
pub fn dotted_property_access_str(obj: &str, path: &str) -> String {
  path.split('.').fold(obj.to_string(), |acc, segment| property_access_str(&acc, segment))
}

pub fn to_module_import_export_name(name: &str) -> String {
  if is_validate_identifier_name(name) { name.into() } else { quote_str(name) }
}

/// Key of an object literal property. Reserved words are fine as keys.
pub fn to_property_key(name: &str) -> String {
  to_module_import_export_name(name)
}

#[test]
fn test_is_validate_identifier_name() {
  assert!(is_validate_identifier_name("foo"));
  assert!(!is_validate_identifier_name("1aaaa"));
  assert!(!is_validate_identifier_name("😈"));
}

#[test]
fn test_property_access_str() {
  assert_eq!(property_access_str("global", "Vue"), "global.Vue");
  assert_eq!(property_access_str("global", "widget-lib"), "global[\"widget-lib\"]");
  assert_eq!(dotted_property_access_str("global", "Acme.Widgets"), "global.Acme.Widgets");
}

#[test]
fn test_is_validate_global_name() {
  assert!(is_validate_global_name("Vue"));
  assert!(is_validate_global_name("Acme.Widgets"));
  assert!(!is_validate_global_name("Acme..Widgets"));
  assert!(!is_validate_global_name(""));
  assert!(!is_validate_global_name("vue-lib"));
}
