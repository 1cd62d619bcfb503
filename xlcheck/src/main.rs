//! Report the parameters of XL rewrite rules.

use clap::Parser;
use xlcheck::{process, Error, Opt, PathRead};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env("LOG").init();

    let opt = Opt::parse();

    // if a precise number of parallel jobs has been given
    if let Some(Some(jobs)) = opt.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()?;
    }

    let files = PathRead::from_paths(&opt.files)?;
    let summaries = if opt.jobs.is_some() {
        process::par(&files, &opt)
    } else {
        process::seq(&files, &opt)
    };

    let mut rejected = 0;
    for summary in summaries {
        if !opt.quiet {
            summary.report.iter().for_each(|line| println!("{}", line));
        }
        log::info!(
            "{}: {} rewrites under {} heads, {} rejected",
            summary.name,
            summary.rules,
            summary.heads,
            summary.rejected
        );
        rejected += summary.rejected;
    }

    if rejected > 0 {
        log::error!("{} rewrites rejected", rejected);
        return Err(Error::Rejected(rejected));
    }
    Ok(())
}
