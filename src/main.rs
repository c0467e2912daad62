use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use imunidade_pdf::{
    Category, DeclarationRecord, Error, FontConfig, RenderOptions, RequestForm, VisualStyle,
    reference, validate,
};

#[derive(Parser, Debug)]
#[command(
    name = "imunidade-pdf",
    version,
    about = "Render municipal tax immunity requests as PDF"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a request form (JSON) and write the PDF
    Render {
        form: PathBuf,
        #[arg(short, long, default_value = ".", help = "Output directory")]
        output: PathBuf,
        #[arg(long, value_enum, help = "Visual style (default: IMUNIDADE_STYLE or decorated)")]
        style: Option<StyleArg>,
        #[arg(long, help = "TrueType font to embed instead of Helvetica")]
        font_regular: Option<PathBuf>,
        #[arg(long, requires = "font_regular")]
        font_bold: Option<PathBuf>,
        #[arg(long, requires = "font_regular")]
        font_italic: Option<PathBuf>,
    },
    /// Required documents and notes for a category
    Checklist {
        #[arg(value_parser = parse_category)]
        category: Category,
    },
    /// List category tags
    Categories,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleArg {
    Decorated,
    Plain,
}

impl From<StyleArg> for VisualStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Decorated => VisualStyle::Decorated,
            StyleArg::Plain => VisualStyle::Plain,
        }
    }
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse().map_err(|e: Error| e.to_string())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            form,
            output,
            style,
            font_regular,
            font_bold,
            font_italic,
        } => {
            let mut options = RenderOptions::from_env();
            if let Some(style) = style {
                options.style = style.into();
            }
            if let Some(regular) = font_regular {
                options.fonts = FontConfig::TrueType {
                    regular,
                    bold: font_bold,
                    italic: font_italic,
                };
            }
            match render(&form, &output, &options) {
                Ok(path) => {
                    println!("{}", path.display());
                    ExitCode::SUCCESS
                }
                Err(Error::Validation(errors)) => {
                    eprintln!("{} problem(s) in {}:", errors.len(), form.display());
                    for error in errors.iter() {
                        eprintln!("  - {error}");
                    }
                    ExitCode::FAILURE
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Checklist { category } => {
            println!("{}", category.title());
            println!("{}", category.citation());
            println!();
            println!("Documentos necessários:");
            for doc in reference::required_documents(category) {
                println!("  {doc}");
            }
            println!();
            println!("Observações importantes:");
            for note in reference::important_notes(category) {
                println!("  - {note}");
            }
            println!();
            println!("Validade do certificado: {}", reference::CERTIFICATE_VALIDITY);
            println!("{}", reference::RENEWAL_INFO);
            ExitCode::SUCCESS
        }
        Commands::Categories => {
            for category in Category::ALL {
                println!(
                    "{:<12} {}  ({})",
                    category.tag(),
                    category.title(),
                    category.citation()
                );
            }
            ExitCode::SUCCESS
        }
    }
}

fn render(form_path: &Path, output: &Path, options: &RenderOptions) -> Result<PathBuf, Error> {
    let json = std::fs::read_to_string(form_path)?;
    let form = RequestForm::from_json(&json)?;
    validate::validate_form(&form).map_err(Error::Validation)?;
    let record = DeclarationRecord::try_from(&form)?;
    std::fs::create_dir_all(output)?;
    imunidade_pdf::write_request_pdf(&record, options, output)
}
