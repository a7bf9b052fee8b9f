use super::Parser;

#[derive(Parser, Debug)]
#[command(name = "filmorate", about = "Film catalogue HTTP service")]
pub struct Cli {
    /// Settings file, without or with extension.
    #[arg(long)]
    pub settings: Option<String>,
    /// Listen address, overrides `http.address`.
    #[arg(long)]
    pub address: Option<String>,
}
