use clap::Parser;
use securevault::cli::commands::{generate::Exclusions, update::UpdateArgs};
use securevault::cli::{commands, Cli, Commands, UserAction};

fn main() {
    let cli = Cli::parse();

    securevault::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Add {
            ref name,
            ref content,
            ref item_type,
            ref category,
            ref tags,
        } => commands::add::execute(&cli, name, content.as_deref(), item_type, category, tags),
        Commands::Upload {
            ref path,
            ref name,
            ref category,
        } => commands::upload::execute(&cli, path, name.as_deref(), category),
        Commands::Download { ref id, ref output } => {
            commands::download::execute(&cli, id, output.as_deref())
        }
        Commands::List {
            ref search,
            ref category,
            ref item_type,
            encrypted,
        } => commands::list::execute(
            &cli,
            search.as_deref(),
            category.as_deref(),
            item_type.as_deref(),
            encrypted,
        ),
        Commands::Show { ref id } => commands::show::execute(&cli, id),
        Commands::Update {
            ref id,
            ref name,
            ref item_type,
            ref content,
            ref category,
            ref tags,
        } => commands::update::execute(
            &cli,
            id,
            UpdateArgs {
                name: name.as_deref(),
                item_type: item_type.as_deref(),
                content: content.as_deref(),
                category: category.as_deref(),
                tags: tags.as_deref(),
            },
        ),
        Commands::Delete { ref id, force } => commands::delete::execute(&cli, id, force),
        Commands::Encrypt { ref id, tier } => commands::encrypt::execute(&cli, id, tier),
        Commands::Decrypt { ref id } => commands::decrypt::execute(&cli, id),
        Commands::Export {
            ref format,
            tier,
            ref output,
        } => commands::export::execute(&cli, format, tier, output.as_deref()),
        Commands::Import {
            ref file,
            ref format,
            force,
        } => commands::import_cmd::execute(&cli, file, format.as_deref(), force),
        Commands::Stats => commands::stats::execute(&cli),
        Commands::Categories => commands::categories::execute(&cli),
        Commands::Generate {
            length,
            no_uppercase,
            no_lowercase,
            no_numbers,
            no_special,
        } => commands::generate::execute(
            length,
            Exclusions {
                uppercase: no_uppercase,
                lowercase: no_lowercase,
                numbers: no_numbers,
                special: no_special,
            },
        ),
        Commands::CheckPassword { ref password } => {
            commands::check_password::execute(password.as_deref())
        }
        Commands::User { ref action } => match action {
            UserAction::Register { ref username } => {
                commands::user::execute_register(&cli, username)
            }
            UserAction::Login { ref username } => commands::user::execute_login(&cli, username),
        },
        Commands::Audit { last, ref since } => {
            commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        Commands::Version => commands::version::execute(),
        Commands::Completions { ref shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        tracing::debug!(kind = ?e.kind(), "command failed");
        securevault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
