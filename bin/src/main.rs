//! Octray

#[macro_use]
extern crate log;

mod options;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use octray_integrators::Renderer;
use octray_scene::load_scene;
use options::Options;
use std::error::Error;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

fn main() {
    env_logger::init();

    let options = Options::parse();
    if let Err(err) = run(&options) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(options: &Options) -> Result<(), Box<dyn Error>> {
    if options.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(options.threads)
            .build_global()?;
    }

    let start = Instant::now();
    let scene = load_scene(&options.scene, options.aggregate_kind())?;
    info!("loaded scene in {:.2?}", start.elapsed());

    let mut renderer = Renderer::new(options.render_options());
    renderer.setup(scene);

    let progress = ProgressBar::new(options.height as u64).with_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows",
        )?
        .progress_chars("=> "),
    );

    let start = Instant::now();
    let cancel = AtomicBool::new(false);
    renderer.render_with(&cancel, |_| progress.inc(1));
    progress.finish_and_clear();
    info!("rendered in {:.2?}", start.elapsed());

    renderer.framebuffer().save(&options.output)?;
    info!("wrote {}", options.output.display());

    Ok(())
}
