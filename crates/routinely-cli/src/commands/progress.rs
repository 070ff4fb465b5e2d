use super::{print_json, CliResult, Context};

pub fn run() -> CliResult {
    let ctx = Context::open()?;
    print_json(&ctx.store.progress_summary())?;
    ctx.finish()
}
