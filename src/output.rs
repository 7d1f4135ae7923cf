use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

fn quiet_from_env() -> bool {
    std::env::var("GITBM_QUIET")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// `GITBM_QUIET=1` silences everything but errors.
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(quiet_from_env)
}

/// Force quiet mode on top of `GITBM_QUIET`. Only effective before the
/// first [`is_quiet`] call.
pub fn set_quiet(quiet: bool) {
    let _ = QUIET.set(quiet || quiet_from_env());
}

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

/// Build the JSON envelope for a successful command.
pub fn success_envelope(command: &str, data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    })
}

/// Print the JSON envelope for a successful command. No-op in human mode.
pub fn emit_success(mode: OutputMode, command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    if mode == OutputMode::Json {
        println!("{}", serde_json::to_string_pretty(&success_envelope(command, data))?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let value = success_envelope("show", serde_json::json!({"group": "alpha"}));
        assert_eq!(value["ok"], true);
        assert_eq!(value["command"], "show");
        assert_eq!(value["data"]["group"], "alpha");
    }
}
