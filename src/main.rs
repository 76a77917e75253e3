use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use concorder::client::{ApiClient, ClientConfig};
use concorder::driver;
use concorder::errors::{self, Result};
use concorder::extract;
use concorder::output;
use concorder::query::{Language, SearchRequest};
use log::{error, info};
use std::{fs, io, process};

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Lemma(s) to search for, combined with OR (e.g. aspicio or πόλις)
    #[arg(required = true)]
    lemmas: Vec<String>,
    /// Restrict to this author, as spelled in the corpus metadata
    #[arg(short, long)]
    author: Option<String>,
    /// Restrict to this work title
    #[arg(short, long)]
    title: Option<String>,
    /// Output CSV path
    #[arg(short, long, default_value = "output.csv")]
    output: String,
    /// Corpus language
    #[arg(short = 'L', long, value_enum, default_value_t = Language::Latin)]
    language: Language,
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn process(args: &Args) -> Result<()> {
    let request = SearchRequest {
        lemmas: args.lemmas.clone(),
        author: args.author.clone(),
        title: args.title.clone(),
        language: args.language,
    };
    info!("language: {}", request.language);
    info!("lemmas: {}", request.lemmas.join(", "));
    if let Some(author) = &request.author {
        info!("author filter: {author}");
    }
    if let Some(title) = &request.title {
        info!("title filter: {title}");
    }
    let client = ApiClient::new(ClientConfig::for_language(request.language))?;
    let response = driver::retrieve(&client, &request)?;
    // Output file is only created once retrieval has succeeded
    let file = fs::File::create(&args.output)
        .map_err(|e| errors::output_error(format!("cannot create {}: {e}", args.output)))?;
    let rows = extract::rows(&response, &request, client.nav_url());
    let count = output::write_csv(io::BufWriter::new(file), rows)?;
    println!("Extracted {count} tokens into {}", args.output);
    Ok(())
}

fn main() {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    match process(&args) {
        Ok(()) => (),
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    }
}
