pub mod check;
pub mod run;
pub mod view;

use clap::Args;

use crate::cli_util::print_turtle_error;
use crate::config::GridSettings;
use crate::parser;

/// Grid placement flags shared by `run` and `view`.
#[derive(Args, Debug, Default, Clone)]
pub struct GridArgs {
    /// Grid width in cells (config `grid.width`; default 9)
    #[arg(long = "width", value_name = "W", allow_negative_numbers = true)]
    pub width: Option<i32>,

    /// Grid height in cells (config `grid.height`; default 9)
    #[arg(long = "height", value_name = "H", allow_negative_numbers = true)]
    pub height: Option<i32>,

    /// Starting column (config `grid.start_x`; default 3)
    #[arg(long = "start-x", value_name = "X", allow_negative_numbers = true)]
    pub start_x: Option<i32>,

    /// Starting row (config `grid.start_y`; default 3)
    #[arg(long = "start-y", value_name = "Y", allow_negative_numbers = true)]
    pub start_y: Option<i32>,
}

impl GridArgs {
    /// Flags win over the config file, which wins over built-in defaults.
    pub fn resolve(&self, base: &GridSettings) -> GridSettings {
        GridSettings {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            start_x: self.start_x.unwrap_or(base.start_x),
            start_y: self.start_y.unwrap_or(base.start_y),
            delay_ms: base.delay_ms,
        }
    }
}

/// Pick the instruction file from `--file` or the positional path.
/// `Err(2)` means a usage error the caller should report with its usage text.
pub(crate) fn select_path(program: &str, file: Option<String>, positional: Option<String>) -> Result<String, i32> {
    match (file, positional) {
        (Some(_), Some(_)) => {
            eprintln!("{program}: cannot use positional PATH together with --file");
            Err(2)
        }
        (Some(path), None) | (None, Some(path)) => Ok(path),
        (None, None) => Err(2),
    }
}

/// Read an instruction file, reporting failures on stderr.
pub(crate) fn read_source(program: &str, path: &str) -> Option<String> {
    match parser::read_source(path) {
        Ok(s) => Some(s),
        Err(err) => {
            print_turtle_error(Some(program), "", &err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let base = GridSettings { width: 20, delay_ms: 50, ..GridSettings::default() };
        let args = GridArgs { height: Some(4), start_x: Some(0), ..GridArgs::default() };
        let resolved = args.resolve(&base);
        assert_eq!(resolved.width, 20);
        assert_eq!(resolved.height, 4);
        assert_eq!(resolved.start_x, 0);
        assert_eq!(resolved.start_y, 3);
        assert_eq!(resolved.delay_ms, 50);
    }

    #[test]
    fn unreadable_file_is_reported_as_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.tur");
        assert_eq!(read_source("t", &missing.to_string_lossy()), None);
        assert!(matches!(parser::read_source(&missing), Err(crate::TurtleError::Io { .. })));

        let file = dir.path().join("ok.tur");
        std::fs::write(&file, "E_SET").unwrap();
        assert_eq!(read_source("t", &file.to_string_lossy()).as_deref(), Some("E_SET"));
    }

    #[test]
    fn path_selection() {
        assert_eq!(select_path("t", Some("a".into()), None), Ok("a".to_string()));
        assert_eq!(select_path("t", None, Some("b".into())), Ok("b".to_string()));
        assert_eq!(select_path("t", None, None), Err(2));
        assert_eq!(select_path("t", Some("a".into()), Some("b".into())), Err(2));
    }
}
