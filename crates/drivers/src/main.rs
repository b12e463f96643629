mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use boardkit_adapters::{
    present_board_row, present_export_report, present_image_row, present_import_report,
    present_json, FsSourceOpener, ImageCrateDecoder, SqliteBoardStore, SystemClock,
    ZipArchiveWriter,
};
use boardkit_application::{
    ApplicationError, ApplicationPorts, ApplicationService, BootstrapStoreCommand,
    CreateBoardCommand, ImportImagesCommand, ImportSource, ListBoardImagesCommand,
    ListBoardsCommand, RetrieveBoardImagesCommand, SetStarredCommand,
};
use boardkit_domain::{BoardId, ImageCategory, ImageName, ImageQuery};
use clap::{ArgGroup, Args, Parser, Subcommand};
use config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "boardkit", version, about = "Import, select and export board images")]
struct Cli {
    /// Path to a boardkit.toml configuration file
    #[arg(long, global = true, env = "BOARDKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage boards
    #[command(subcommand)]
    Board(BoardCommand),
    /// Import images from a folder or a ZIP archive into a board
    Import(ImportArgs),
    /// List the images of a board, oldest first
    List(FilterArgs),
    /// Star or unstar an image
    Star {
        image: String,
        #[arg(long)]
        unset: bool,
    },
    /// Select images from a board and optionally save them to a ZIP archive
    Retrieve(RetrieveArgs),
}

#[derive(Debug, Subcommand)]
enum BoardCommand {
    Create {
        board_id: String,
        #[arg(long, default_value = "")]
        name: String,
    },
    List,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("source").required(true).args(["folder", "zip"])))]
struct ImportArgs {
    #[arg(long)]
    board: String,
    #[arg(long)]
    folder: Option<PathBuf>,
    #[arg(long)]
    zip: Option<PathBuf>,
    #[arg(long, default_value = "images")]
    category: String,
}

#[derive(Debug, Args)]
struct FilterArgs {
    #[arg(long)]
    board: String,
    #[arg(long, default_value = "images")]
    category: String,
    #[arg(long)]
    starred_only: bool,
    #[arg(long)]
    keyword: Option<String>,
}

#[derive(Debug, Args)]
struct RetrieveArgs {
    #[command(flatten)]
    filter: FilterArgs,
    /// `all`, an index from the end (`3`), a range from the start (`30-50`), or a comma list
    #[arg(long, default_value = "all")]
    select: String,
    #[arg(long)]
    save_to_zip: bool,
    #[arg(long)]
    save_metadata: bool,
    /// Archive file (`*.zip`) or directory to place `<board>_images.zip` in
    #[arg(long)]
    save_location: Option<PathBuf>,
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

impl From<ApplicationError> for CommandError {
    fn from(error: ApplicationError) -> Self {
        match error {
            ApplicationError::Domain(_)
            | ApplicationError::InvalidInput(_)
            | ApplicationError::EmptySelection { .. } => Self::Usage(error.to_string()),
            other => Self::Runtime(other.to_string()),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::from(2);
        }
    };
    logging::init_logging(&config.log_level);
    tracing::debug!(
        catalog = %config.catalog_path,
        library = %config.library_dir,
        "configuration loaded"
    );

    let service = build_application_service(&config);
    if let Err(error) = service.bootstrap_store(BootstrapStoreCommand) {
        eprintln!("failed to bootstrap boardkit: {error}");
        return ExitCode::from(1);
    }

    match run_command(cli.command, cli.json, &service) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

fn build_application_service(config: &AppConfig) -> ApplicationService {
    let store = SqliteBoardStore::new(&config.catalog_path, &config.library_dir);
    ApplicationService::new(
        ApplicationPorts {
            store: Box::new(store.clone()),
            paths: Box::new(store.clone()),
            metadata: Some(Box::new(store)),
            opener: Box::new(FsSourceOpener::new(config.image_extensions.clone())),
            decoder: Box::new(ImageCrateDecoder),
            archive: Some(Box::new(ZipArchiveWriter)),
            clock: Box::new(SystemClock),
        },
        PathBuf::from(&config.export_dir),
    )
}

fn run_command(
    command: Command,
    json: bool,
    service: &ApplicationService,
) -> Result<(), CommandError> {
    match command {
        Command::Board(BoardCommand::Create { board_id, name }) => {
            let board = service.create_board(CreateBoardCommand {
                board_id: parse_board_id(&board_id)?,
                board_name: name,
            })?;
            println!("{}", present_board_row(&board));
            Ok(())
        }
        Command::Board(BoardCommand::List) => {
            let boards = service.list_boards(ListBoardsCommand)?;
            if boards.is_empty() {
                println!("no boards");
            }
            for board in boards {
                println!("{}", present_board_row(&board));
            }
            Ok(())
        }
        Command::Import(args) => {
            let source = match (args.folder, args.zip) {
                (Some(folder), _) => ImportSource::Directory(folder),
                (None, Some(zip)) => ImportSource::Archive(zip),
                (None, None) => {
                    return Err(CommandError::Usage(
                        "either --folder or --zip is required".to_string(),
                    ))
                }
            };
            let report = service.import_images(ImportImagesCommand {
                source,
                board_id: parse_board_id(&args.board)?,
                category: parse_category(&args.category)?,
                cancel: None,
            })?;
            if json {
                println!("{}", present_json(&report));
            } else {
                for line in present_import_report(&report) {
                    println!("{line}");
                }
            }
            Ok(())
        }
        Command::List(filter) => {
            let images = service.list_board_images(ListBoardImagesCommand {
                query: build_query(filter)?,
            })?;
            if images.is_empty() {
                println!("no images on board");
                return Ok(());
            }
            for image in images {
                println!("{}", present_image_row(&image));
            }
            Ok(())
        }
        Command::Star { image, unset } => {
            let image = ImageName::new(image)
                .map_err(|error| CommandError::Usage(format!("invalid image name: {error}")))?;
            service.set_starred(SetStarredCommand {
                image,
                starred: !unset,
            })?;
            Ok(())
        }
        Command::Retrieve(args) => {
            let report = service.retrieve_board_images(RetrieveBoardImagesCommand {
                query: build_query(args.filter)?,
                selection: args.select,
                save_to_zip: args.save_to_zip,
                save_metadata: args.save_metadata,
                save_location: args.save_location,
            })?;
            if json {
                println!("{}", present_json(&report));
            } else {
                for line in present_export_report(&report) {
                    println!("{line}");
                }
            }
            Ok(())
        }
    }
}

fn parse_board_id(value: &str) -> Result<BoardId, CommandError> {
    BoardId::new(value).map_err(|error| CommandError::Usage(format!("invalid board id: {error}")))
}

fn parse_category(value: &str) -> Result<ImageCategory, CommandError> {
    value
        .parse()
        .map_err(|error: boardkit_domain::DomainError| CommandError::Usage(error.to_string()))
}

fn build_query(filter: FilterArgs) -> Result<ImageQuery, CommandError> {
    Ok(ImageQuery {
        board_id: parse_board_id(&filter.board)?,
        category: parse_category(&filter.category)?,
        starred_only: filter.starred_only,
        keyword: filter.keyword,
    })
}
