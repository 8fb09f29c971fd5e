use clap::Parser;
use relm4::prelude::*;
use std::time::Duration;
use tickbox::config;
use tickbox::gui::app::AppModel;
use tickbox::sys::runtime;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Edge length of the checkbox in pixels
    #[arg(short, long, default_value_t = 96)]
    size: i32,

    /// Animation duration in milliseconds (overrides the config file)
    #[arg(short, long)]
    duration: Option<u64>,

    /// Write the default config file if missing, print its path and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.write_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let style = config::load_or_default();
    let duration_override = args.duration.map(Duration::from_millis);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    // gtk must not see our own flags
    let app = RelmApp::new("org.tickbox.demo").with_args(Vec::new());

    app.run::<AppModel>((style, args.size.max(1), duration_override, rx));
    Ok(())
}
