use clap::ValueEnum;

/// A stage in the processing of rewrites.
///
/// This is useful to omit certain parts of rewrite processing.
/// Omitting one stage also omits all stages after it,
/// i.e. all stages greater than the stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Stage {
    /// Parameter extraction
    Extract,
    /// Registration in the table of rewrites
    Register,
}
