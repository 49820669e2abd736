use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = scripture_api::Args::parse();

	scripture_api::run(args).await
}
