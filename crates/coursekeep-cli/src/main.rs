use std::path::PathBuf;

use clap::{Parser, Subcommand};
use coursekeep_cli::admin::{AdminInput, create_admin};
use coursekeep_cli::roles::describe_roles;
use coursekeep_config::RbacConfig;
use coursekeep_db::{PgUserRepository, init_db_pool, run_migrations};
use coursekeep_rbac::RoleManager;
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "coursekeep-cli")]
#[command(about = "Coursekeep CLI - Administrative tools for Coursekeep", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// First name
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Middle name
        #[arg(short = 'm', long)]
        middle_name: Option<String>,

        /// Surname
        #[arg(short = 's', long)]
        surname: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Phone number in E.164 format
        #[arg(long)]
        phone: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Load the role definition file and print what it grants
    CheckRoles {
        /// Role file path (defaults to ROLES_PATH, then roles.json)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdmin {
            first_name,
            middle_name,
            surname,
            email,
            phone,
            password,
        } => {
            let input = AdminInput {
                first_name: first_name.unwrap_or_else(|| prompt("First name")),
                middle_name: middle_name.unwrap_or_else(|| prompt("Middle name")),
                surname: surname.unwrap_or_else(|| prompt("Surname")),
                email: email.unwrap_or_else(|| prompt("Email address")),
                phone: phone.unwrap_or_else(|| prompt("Phone")),
                password: password.unwrap_or_else(|| {
                    Password::new()
                        .with_prompt("Password")
                        .with_confirmation("Confirm password", "Passwords don't match")
                        .interact()
                        .unwrap_or_else(|e| fail("Failed to read password", e))
                }),
            };
            handle_create_admin(input).await
        }
        Commands::CheckRoles { path } => handle_check_roles(path),
    }
}

fn prompt(label: &str) -> String {
    Input::new()
        .with_prompt(label)
        .interact_text()
        .unwrap_or_else(|e| fail(&format!("Failed to read {}", label.to_lowercase()), e))
}

fn fail(context: &str, e: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}: {}", context, e);
    std::process::exit(1);
}

async fn handle_create_admin(input: AdminInput) {
    let pool = init_db_pool()
        .await
        .unwrap_or_else(|e| fail("Error connecting to database", e));
    if let Err(e) = run_migrations(&pool).await {
        fail("Error running migrations", e);
    }

    let repo = PgUserRepository::new(pool);
    let email = input.email.clone();

    match create_admin(&repo, input).await {
        Ok(id) => {
            println!("\n✅ Admin created successfully!");
            println!("   Id: {}", id);
            println!("   Email: {}", email);
        }
        Err(e) => fail("Error creating admin", e),
    }
}

fn handle_check_roles(path: Option<PathBuf>) {
    let path = path.unwrap_or_else(|| RbacConfig::from_env().roles_path);

    match RoleManager::from_file(&path) {
        Ok(manager) => {
            println!("✅ {} is valid\n", path.display());
            print!("{}", describe_roles(&manager));
        }
        Err(e) => fail("Invalid role file", e),
    }
}
