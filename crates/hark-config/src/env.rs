use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Expand `{{ env.VAR }}` placeholders in a raw TOML string
///
/// An optional fallback can be given as `{{ env.VAR | default("value") }}`,
/// used when the variable is unset. Expansion happens before
/// deserialization, so config structs use plain String/SecretString.
/// Lines starting with `#` (TOML comments) are passed through unchanged.
pub fn expand_env(input: &str) -> Result<String, String> {
    fn re() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        // Group 1: variable name, group 2: optional default value
        RE.get_or_init(|| {
            Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
                .expect("must be valid regex")
        })
    }

    let mut missing: Option<String> = None;

    let mut output = input
        .lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                return line.to_string();
            }

            re().replace_all(line, |caps: &Captures<'_>| {
                let var = &caps[1];
                std::env::var(var).unwrap_or_else(|_| match caps.get(2) {
                    Some(default) => default.as_str().to_string(),
                    None => {
                        if missing.is_none() {
                            missing = Some(var.to_string());
                        }
                        String::new()
                    }
                })
            })
            .into_owned()
        })
        .collect::<Vec<_>>()
        .join("\n");

    if let Some(var) = missing {
        return Err(format!("environment variable not found: `{var}`"));
    }

    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}
