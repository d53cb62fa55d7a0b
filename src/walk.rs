//! Option tree walker: populate a config struct from a decoded mapping.
//!
//! Options are visited in declaration order. For each one:
//!
//! - key absent → skipped; omission is never an error.
//! - parent option → the value must be a mapping, which is walked with the
//!   option's children. Anything else aborts the whole walk with
//!   [`WalkError::NotAMapping`].
//! - leaf option → the value is coerced and written through the option's
//!   setter. A coercion failure aborts the walk.
//!
//! Keys in the mapping that no option claims are ignored. [`unknown_keys`]
//! lists them for callers that want to be strict.
//!
//! Writes happen as the walk goes. If a later option fails, values already
//! written stay written.

use tracing::trace;

use crate::error::WalkError;
use crate::option::Opt;
use crate::value::{Mapping, Value};

/// Walk `opts` against `mapping`, writing leaf values into `config`.
pub fn populate<C>(mapping: &Mapping, opts: &[Opt<C>], config: &mut C) -> Result<(), WalkError> {
    for opt in opts {
        let Some(value) = mapping.get(opt.id()) else {
            trace!(option = opt.full_id(), "not set in config file");
            continue;
        };

        if opt.is_parent() {
            match value {
                Value::Mapping(nested) => populate(nested, opt.sub_opts(), config)?,
                other => {
                    return Err(WalkError::NotAMapping {
                        option: opt.full_id().to_string(),
                        found: other.type_name(),
                    });
                }
            }
        } else {
            opt.assign(config, value)?;
        }
    }
    Ok(())
}

/// Dotted paths of every key in `mapping` that no option in `opts` claims.
///
/// Only mappings under parent options are descended into; whatever sits below
/// a leaf belongs to that leaf. A parent whose value is not a mapping is left
/// for [`populate`] to reject.
pub fn unknown_keys<C>(mapping: &Mapping, opts: &[Opt<C>]) -> Vec<String> {
    let mut out = Vec::new();
    collect_unknown(mapping, opts, "", &mut out);
    out
}

fn collect_unknown<C>(mapping: &Mapping, opts: &[Opt<C>], prefix: &str, out: &mut Vec<String>) {
    for (key, value) in mapping {
        let dotted = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match opts.iter().find(|o| o.id() == key) {
            None => {
                trace!(key = %dotted, "no option for config key");
                out.push(dotted);
            }
            Some(opt) if opt.is_parent() => {
                if let Value::Mapping(nested) = value {
                    collect_unknown(nested, opt.sub_opts(), &dotted, out);
                }
            }
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::CoerceError;
    use crate::fixtures::test::{AppConfig, app_schema};
    use crate::option::Schema;

    fn mapping(json: &str) -> Mapping {
        serde_json::from_str(json).unwrap()
    }

    fn run(json: &str) -> (Result<(), WalkError>, AppConfig) {
        let schema = app_schema();
        let mut config = AppConfig::default();
        let result = populate(&mapping(json), schema.opts(), &mut config);
        (result, config)
    }

    #[test]
    fn empty_mapping_writes_nothing() {
        let (result, config) = run("{}");
        result.unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn server_scenario() {
        let (result, config) = run(r#"{"server": {"host": "localhost", "port": 8080}}"#);
        result.unwrap();
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.name, "");
        assert_eq!(config.server.tls, Default::default());
    }

    #[test]
    fn server_given_as_string_fails() {
        let (result, _) = run(r#"{"server": "localhost:8080"}"#);
        match result.unwrap_err() {
            WalkError::NotAMapping { option, found } => {
                assert_eq!(option, "server");
                assert_eq!(found, "string");
            }
            other => panic!("Expected NotAMapping, got: {other:?}"),
        }
    }

    #[test]
    fn parent_given_sequence_fails() {
        let (result, _) = run(r#"{"server": [1, 2]}"#);
        assert!(matches!(
            result,
            Err(WalkError::NotAMapping { found: "sequence", .. })
        ));
    }

    #[test]
    fn structural_error_stops_before_later_siblings() {
        // `name` is declared before `server`, `tags` after it.
        let (result, config) = run(r#"{"name": "svc", "server": 5, "tags": ["a"]}"#);
        assert!(result.is_err());
        assert_eq!(config.name, "svc");
        assert!(config.tags.is_empty());
    }

    #[test]
    fn nested_error_reports_full_path_unwrapped() {
        let (result, _) = run(r#"{"server": {"tls": true}}"#);
        match result.unwrap_err() {
            WalkError::NotAMapping { option, found } => {
                assert_eq!(option, "server.tls");
                assert_eq!(found, "bool");
            }
            other => panic!("Expected NotAMapping, got: {other:?}"),
        }
    }

    #[test]
    fn coercion_error_names_leaf() {
        let (result, _) = run(r#"{"server": {"port": "eighty"}}"#);
        match result.unwrap_err() {
            WalkError::Coerce { option, source } => {
                assert_eq!(option, "server.port");
                assert_eq!(
                    source,
                    CoerceError::TypeMismatch {
                        expected: "integer",
                        found: "string"
                    }
                );
            }
            other => panic!("Expected Coerce, got: {other:?}"),
        }
    }

    #[test]
    fn partial_writes_are_kept_on_failure() {
        let (result, config) = run(r#"{"name": "svc", "server": {"host": "h", "port": -1}}"#);
        assert!(result.is_err());
        assert_eq!(config.name, "svc");
        assert_eq!(config.server.host, "h");
    }

    #[test]
    fn unknown_keys_ignored_by_populate() {
        let (result, config) = run(r#"{"name": "svc", "extra": 1, "server": {"bogus": true}}"#);
        result.unwrap();
        assert_eq!(config.name, "svc");
    }

    #[test]
    fn declaration_order_governs_failure() {
        // Both `server` and `ratio` are bad; `server` is declared first.
        let (result, _) = run(r#"{"ratio": "high", "server": 1}"#);
        assert!(matches!(result, Err(WalkError::NotAMapping { .. })));
    }

    #[test]
    fn null_clears_optional_leaf() {
        let schema = app_schema();
        let mut config = AppConfig::default();
        config.server.tls.cert = Some("old.pem".into());
        populate(
            &mapping(r#"{"server": {"tls": {"cert": null, "enabled": true}}}"#),
            schema.opts(),
            &mut config,
        )
        .unwrap();
        assert_eq!(config.server.tls.cert, None);
        assert!(config.server.tls.enabled);
    }

    #[test]
    fn empty_parent_walks_nothing() {
        let schema: Schema<AppConfig> =
            Schema::new(vec![crate::option::Opt::parent("empty", vec![])]).unwrap();
        let mut config = AppConfig::default();
        populate(&mapping(r#"{"empty": {"x": 1}}"#), schema.opts(), &mut config).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    // --- unknown_keys ---

    #[test]
    fn unknown_keys_none() {
        let schema = app_schema();
        let m = mapping(r#"{"name": "x", "server": {"tls": {"enabled": true}}}"#);
        assert!(unknown_keys(&m, schema.opts()).is_empty());
    }

    #[test]
    fn unknown_keys_top_and_nested() {
        let schema = app_schema();
        let m = mapping(r#"{"typo": 1, "server": {"hots": "x", "tls": {"enbled": true}}}"#);
        let keys = unknown_keys(&m, schema.opts());
        assert_eq!(keys, vec!["server.hots", "server.tls.enbled", "typo"]);
    }

    #[test]
    fn unknown_keys_skip_below_leaves() {
        let schema = app_schema();
        let m = mapping(r#"{"tags": {"nested": 1}}"#);
        assert!(unknown_keys(&m, schema.opts()).is_empty());
    }
}
