use clap::Parser;
use env_logger::Env;
use guess_tree::data::loader::CsvLoader;
use guess_tree::game::console::ConsoleGame;
use guess_tree::game::params::AnswerTokens;
use guess_tree::trees::builder::build_tree;
use std::error::Error;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "guess")]
#[command(about = "Think of an entity from the dataset and let the decision tree guess it")]
#[command(version)]
struct Cli {
    /// CSV file with one entity per row
    #[arg(default_value = "datasets/countries.csv")]
    dataset: PathBuf,

    /// The file has no header row
    #[arg(long)]
    no_header: bool,

    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Feature columns to ask about, by header name (default: all but the label)
    #[arg(long, value_delimiter = ',')]
    features: Option<Vec<String>>,

    /// Column holding the entity names (default: the last one)
    #[arg(long)]
    label: Option<String>,

    /// Use the Polish answers 'tak', 'nie' and 'nie wiem'
    #[arg(long)]
    polish: bool,

    /// Affirmative answer
    #[arg(long)]
    yes: Option<String>,

    /// Negative answer
    #[arg(long)]
    no: Option<String>,

    /// "Don't know" answer
    #[arg(long)]
    unknown: Option<String>,

    /// Print the tree before playing
    #[arg(long)]
    print_tree: bool,

    /// Play a single round
    #[arg(long)]
    once: bool,
}

impl Cli {
    fn loader(&self) -> Result<CsvLoader, Box<dyn Error>> {
        let mut loader = CsvLoader::new();
        loader.set_has_headers(!self.no_header);
        let delimiter = u8::try_from(self.delimiter)
            .map_err(|_| format!("Delimiter {:?} is not a single byte.", self.delimiter))?;
        loader.set_delimiter(delimiter);
        if let Some(features) = &self.features {
            loader.set_feature_columns(features.clone())?;
        }
        if let Some(label) = &self.label {
            loader.set_label_column(label.clone());
        }
        Ok(loader)
    }

    fn tokens(&self) -> Result<AnswerTokens, Box<dyn Error>> {
        let mut tokens = if self.polish {
            AnswerTokens::polish()
        } else {
            AnswerTokens::new()
        };
        if let Some(yes) = &self.yes {
            tokens.set_yes(yes)?;
        }
        if let Some(no) = &self.no {
            tokens.set_no(no)?;
        }
        if let Some(unknown) = &self.unknown {
            tokens.set_unknown(unknown)?;
        }
        Ok(tokens)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let dataset = cli.loader()?.load_path(&cli.dataset)?;
    let root = build_tree(&dataset)?;
    if cli.print_tree {
        print!("{}", root.render(dataset.feature_names()));
    }

    let tokens = cli.tokens()?;
    println!(
        "Think of one of {} entities and answer {}.",
        dataset.nrows(),
        tokens.hint()
    );

    let stdin = io::stdin();
    let mut game = ConsoleGame::new(
        stdin.lock(),
        io::stdout(),
        tokens,
        dataset.feature_names().to_vec(),
    );
    if cli.once {
        game.play_round(&root)?;
    } else {
        game.run(&root)?;
    }
    Ok(())
}
