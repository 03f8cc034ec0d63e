use std::path::PathBuf;

use clap::Parser;
use texfast::config::Config;
use texfast::domain::value_objects::{ClearMode, Engine, InfoLevel, MarkerPolicy};

/// texfast - fast LaTeX compilation with a precompiled preamble
#[derive(Parser, Debug)]
#[command(name = "texfast")]
#[command(about, long_about = None, disable_version_flag = true)]
#[command(
    after_help = "The preamble ends at `%end preamble` or `\\begin{document}`.\nPress Ctrl+C to stop watching."
)]
pub struct Cli {
    /// LaTeX source file (the .tex suffix is optional)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Force the creation of the precompiled format
    #[arg(long)]
    pub precompile: bool,

    /// Skip the precompiled header, compile the whole document every time
    #[arg(long)]
    pub skip_fmt: bool,

    /// Do not build the synctex file
    #[arg(long)]
    pub no_synctex: bool,

    /// Compile, then exit without watching the source
    #[arg(long)]
    pub no_watch: bool,

    /// Use xelatex instead of pdflatex
    #[arg(short = 'x', long)]
    pub xelatex: bool,

    /// Number of compilations at start (all but the last are drafts)
    #[arg(long, value_name = "N")]
    pub compiles_at_start: Option<u32>,

    /// Output level [no|errors|errors+log|actions|debug]
    #[arg(long, value_name = "LEVEL")]
    pub info: Option<InfoLevel>,

    /// Regular expression selecting the interesting log lines ("" prints the raw log)
    #[arg(long, value_name = "REGEX")]
    pub log_sanitize: Option<String>,

    /// Regular expression marking the start of the body ("" skips the header)
    #[arg(long, value_name = "REGEX")]
    pub split: Option<String>,

    /// What to do with several split markers [first|unique]
    #[arg(long, value_name = "POLICY")]
    pub split_policy: Option<MarkerPolicy>,

    /// Folder for the compiler's intermediate files
    #[arg(long, value_name = "DIR")]
    pub temp_folder: Option<PathBuf>,

    /// Remove auxiliary files and the format at the end [auto|yes|no]
    #[arg(long, value_name = "MODE")]
    pub clear: Option<ClearMode>,

    /// Comma separated extensions removed by --clear
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    pub aux_extensions: Option<Vec<String>>,

    /// Keep accents and spaces in the job name
    #[arg(long)]
    pub no_normalize: bool,

    /// Extra option passed to the compiler (repeatable)
    #[arg(long = "option", value_name = "OPT", allow_hyphen_values = true)]
    pub options: Vec<String>,

    /// Compiler executable
    #[arg(long, value_name = "PATH")]
    pub compiler: Option<PathBuf>,

    /// Config file instead of texfast.toml or the user config
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Terminate a running compilation on Ctrl+C
    #[arg(long)]
    pub kill_on_exit: bool,

    /// Output events as NDJSON
    #[arg(long)]
    pub json: bool,

    /// Print version information
    #[arg(short = 'v', long)]
    pub version: bool,
}

impl Cli {
    /// Command line flags win over every config layer.
    pub fn apply_to(&self, mut config: Config) -> Config {
        if self.precompile {
            config.format.precompile = true;
        }
        if self.skip_fmt {
            config.format.skip = true;
        }
        if self.no_synctex {
            config.output.synctex = false;
        }
        if self.no_watch {
            config.watch.enabled = false;
        }
        if self.xelatex {
            config.engine = Engine::XeTex;
        }
        if let Some(n) = self.compiles_at_start {
            config.compiles_at_start = n;
        }
        if let Some(info) = self.info {
            config.info = info;
        }
        if let Some(pattern) = &self.log_sanitize {
            config.log_sanitize = pattern.clone();
        }
        if let Some(pattern) = &self.split {
            config.split.pattern = pattern.clone();
        }
        if let Some(policy) = self.split_policy {
            config.split.policy = policy;
        }
        if let Some(dir) = &self.temp_folder {
            config.output.temp_folder = Some(dir.clone());
        }
        if let Some(mode) = self.clear {
            config.clear.mode = mode;
        }
        if let Some(extensions) = &self.aux_extensions {
            config.clear.aux_extensions = extensions.clone();
        }
        if self.no_normalize {
            config.output.normalize = false;
        }
        if !self.options.is_empty() {
            config.options = self.options.clone();
        }
        if let Some(compiler) = &self.compiler {
            config.compiler = Some(compiler.clone());
        }
        if self.kill_on_exit {
            config.watch.kill_on_exit = true;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("texfast").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_config() {
        let cli = parse(&[
            "-x",
            "--no-watch",
            "--info",
            "errors+log",
            "--option",
            "-shell-escape",
            "--aux-extensions",
            "aux,toc",
            "--split-policy",
            "unique",
            "doc",
        ]);
        let config = cli.apply_to(Config::default());

        assert_eq!(cli.file, Some(PathBuf::from("doc")));
        assert_eq!(config.engine, Engine::XeTex);
        assert!(!config.watch.enabled);
        assert_eq!(config.info, InfoLevel::ErrorsAndLog);
        assert_eq!(config.options, vec!["-shell-escape"]);
        assert_eq!(config.clear.aux_extensions, vec!["aux", "toc"]);
        assert_eq!(config.split.policy, MarkerPolicy::Unique);
    }

    #[test]
    fn empty_split_disables_header() {
        let config = parse(&["--split", "", "doc.tex"]).apply_to(Config::default());
        assert!(config.skips_format());
    }

    #[test]
    fn unset_flags_keep_config() {
        let mut base = Config::default();
        base.output.synctex = false;
        base.compiles_at_start = 2;
        let config = parse(&["doc.tex"]).apply_to(base.clone());
        assert_eq!(config, base);
    }

    #[test]
    fn two_files_are_rejected() {
        assert!(Cli::try_parse_from(["texfast", "a.tex", "b.tex"]).is_err());
    }

    #[test]
    fn invalid_info_level_is_rejected() {
        assert!(Cli::try_parse_from(["texfast", "--info", "loud", "a.tex"]).is_err());
    }
}
