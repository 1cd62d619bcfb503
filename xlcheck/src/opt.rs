use crate::Stage;
use clap::Parser;
use std::path::PathBuf;

/// Report the parameters of XL rewrite rules
#[derive(Clone, Debug, Parser)]
#[command(version)]
pub struct Opt {
    /// Perform only operations until (excluding) the given stage.
    #[arg(long, value_enum)]
    pub omit: Option<Stage>,

    /// Process files in parallel
    ///
    /// If this option is given with a number n, then
    /// maximally n files are concurrently processed.
    /// If this option is given without an extra argument, then
    /// the number of concurrently processed files is
    /// determined automatically from the number of CPUs.
    #[arg(long, short = 'j')]
    pub jobs: Option<Option<usize>>,

    /// Print nothing.
    #[arg(long)]
    pub quiet: bool,

    /// Files to process
    ///
    /// Every file has its own table of rewrites.
    /// To read from standard input, use "-" as file name or give no file.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl Opt {
    pub fn omits(&self, stage: Stage) -> bool {
        self.omit.map_or(false, |omit| stage >= omit)
    }
}

#[test]
fn omits() {
    let opt = Opt::parse_from(["xlcheck", "a.xl", "--omit", "extract", "-j"]);
    assert!(opt.omits(Stage::Extract) && opt.omits(Stage::Register));
    assert_eq!(opt.jobs, Some(None));

    let opt = Opt::parse_from(["xlcheck", "--omit", "register", "-j", "4"]);
    assert!(!opt.omits(Stage::Extract) && opt.omits(Stage::Register));
    assert_eq!(opt.jobs, Some(Some(4)));
    assert!(opt.files.is_empty());
}
