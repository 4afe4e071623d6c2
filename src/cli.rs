use clap::{Args, Parser, Subcommand};

use crate::client::{HttpTransport, LeadForm, Phase};

#[derive(Debug, Parser)]
#[command(name = "leadpage", about = "Landing page and lead intake service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Fill in the lead form and submit it to a running server.
    Submit(SubmitArgs),
}

#[derive(Debug, Args)]
pub struct SubmitArgs {
    #[arg(long, default_value = "http://localhost:8080")]
    pub base_url: String,
    #[arg(long, default_value = "")]
    pub full_name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    /// Agree to be contacted.
    #[arg(long)]
    pub consent: bool,
    /// Attribution tag, as `utm_source` would carry it.
    #[arg(long)]
    pub source: Option<String>,
}

impl SubmitArgs {
    pub fn into_form(self) -> (LeadForm, String) {
        let mut form = LeadForm::new(self.source);
        form.full_name = self.full_name;
        form.email = self.email;
        form.phone = self.phone;
        form.consent = self.consent;
        (form, self.base_url)
    }
}

pub async fn run_submit(args: SubmitArgs) -> anyhow::Result<()> {
    let (mut form, base_url) = args.into_form();
    let transport = HttpTransport::new(&base_url);

    form.submit(&transport).await;
    if form.phase() == &Phase::Succeeded {
        tracing::info!(%base_url, "you're on the list");
        return Ok(());
    }
    anyhow::bail!("{}", form.error().unwrap_or("submission did not complete"))
}
