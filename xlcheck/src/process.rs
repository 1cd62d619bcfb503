//! Processing of rewrites in files.

use crate::{Opt, PathRead, Stage};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use xlr::{parse, BuiltinType, Builtins, Compiled, Rewrite, Rewrites, Symbols, Tree};

/// Outcome of processing a file.
#[derive(Debug, Default)]
pub struct Summary {
    pub name: String,
    /// one line per accepted rewrite
    pub report: Vec<String>,
    /// number of registered rewrites
    pub rules: usize,
    /// number of heads with registered rewrites
    pub heads: usize,
    /// number of rejected rewrites
    pub rejected: usize,
}

enum Outcome {
    Parsed(Rewrite),
    Extracted(Compiled<BuiltinType>),
}

fn rewrite(
    tm: Result<Tree, parse::Error>,
    syms: &Symbols,
    opt: &Opt,
) -> Result<Outcome, xlr::Error> {
    let rewrite = Rewrite::try_from(&tm?)?;
    if opt.omits(Stage::Extract) {
        return Ok(Outcome::Parsed(rewrite));
    }
    Ok(Outcome::Extracted(rewrite.compile(syms, &Builtins)?))
}

/// Describe the head, the parameters and the returned type of a rewrite.
fn describe(rule: &Compiled<BuiltinType>) -> String {
    let parms: Vec<_> = rule.parameters.iter().map(|p| p.to_string()).collect();
    let mut s = format!("{} [{}]", rule.head(), parms.join(", "));
    if let Some(ty) = rule.returned {
        s += &format!(" as {}", ty);
    }
    s
}

/// Process all rewrites in a file, registering them in a new table.
pub fn file(pr: &PathRead, opt: &Opt) -> Summary {
    let syms = Symbols::with_basics();
    let mut rewrites = Rewrites::new();
    let mut summary = Summary {
        name: pr.name.clone(),
        ..Default::default()
    };

    for (line, tm) in parse::statements(&pr.text) {
        let rule = match rewrite(tm, &syms, opt) {
            Ok(Outcome::Parsed(rewrite)) => {
                log::info!("{}:{}: parsed {}", pr.name, line, rewrite);
                summary.report.push(format!("{}:{}: {}", pr.name, line, rewrite));
                continue;
            }
            Ok(Outcome::Extracted(rule)) => rule,
            Err(e) => {
                log::error!("{}:{}: {}", pr.name, line, e);
                summary.rejected += 1;
                continue;
            }
        };

        log::info!("{}:{}: extracted {} parameters", pr.name, line, rule.parameters.len());
        summary.report.push(format!("{}:{}: {}", pr.name, line, describe(&rule)));

        if opt.omits(Stage::Register) {
            continue;
        }
        if rewrites.literal(&rule.rewrite.from).next().is_some() {
            log::warn!("{}:{}: pattern {} is already defined", pr.name, line, rule.rewrite.from);
        }
        rewrites.add(rule);
    }

    summary.rules = rewrites.len();
    summary.heads = rewrites.heads();
    summary
}

/// Process files one after the other.
pub fn seq(files: &[PathRead], opt: &Opt) -> Vec<Summary> {
    files.iter().map(|pr| file(pr, opt)).collect()
}

/// Process files in parallel, returning summaries in the order of the files.
pub fn par(files: &[PathRead], opt: &Opt) -> Vec<Summary> {
    files.par_iter().map(|pr| file(pr, opt)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const RULES: &str = "\
// factorial
0! -> 1
(N:integer)! -> N * (N-1)!

if true then X else Y -> X
if false then X else Y -> Y
A + A:real -> 2 * A
(X+Y):integer -> Y+X
0! -> 2
";

    fn opt(args: &[&str]) -> Opt {
        Opt::parse_from(["xlcheck"].iter().chain(args))
    }

    #[test]
    fn summary() {
        let s = file(&PathRead::new("rules.xl", RULES), &opt(&[]));
        assert_eq!(s.rejected, 1);
        assert_eq!((s.rules, s.heads), (6, 3));
        assert_eq!(s.report[0], "rules.xl:2: ! []");
        assert_eq!(s.report[1], "rules.xl:3: ! [N: integer]");
        assert_eq!(s.report[2], "rules.xl:5: if [X: tree, Y: tree]");
        assert_eq!(s.report[4], "rules.xl:8: infix + [X: tree, Y: tree] as integer");
    }

    #[test]
    fn omit() {
        let s = file(&PathRead::new("rules.xl", RULES), &opt(&["--omit", "extract"]));
        // conflicting types are only found by extraction
        assert_eq!((s.rejected, s.rules), (0, 0));
        assert_eq!(s.report.len(), 7);
        assert_eq!(s.report[0], "rules.xl:2: 0 ! -> 1");

        let s = file(&PathRead::new("rules.xl", RULES), &opt(&["--omit", "register"]));
        assert_eq!((s.rejected, s.rules, s.report.len()), (1, 0, 6));
    }

    #[test]
    fn parallel() {
        let files = [
            PathRead::new("a.xl", "sin X -> X\ncos X -> X"),
            PathRead::new("b.xl", "X -> (X"),
        ];
        let opt = opt(&["-j"]);
        let summaries = par(&files, &opt);
        assert_eq!(summaries.len(), 2);
        assert_eq!((summaries[0].rules, summaries[1].rejected), (2, 1));
        assert_eq!(summaries[0].report, seq(&files, &opt)[0].report);
    }
}
