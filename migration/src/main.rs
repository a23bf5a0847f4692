use std::{fs, path::Path, process};
use util::{config, paths};

mod runner;

#[tokio::main]
async fn main() {
    let db_path = config::database_path();
    let url = paths::database_url(&db_path);
    let command = std::env::args().nth(1);

    let outcome = match command.as_deref() {
        Some("clean") => {
            remove_db_file(&db_path);
            Ok(())
        }
        Some("fresh") => {
            remove_db_file(&db_path);
            create_db_dir(&db_path);
            runner::run_all_migrations(&url).await
        }
        Some("up") | None => {
            create_db_dir(&db_path);
            runner::run_all_migrations(&url).await
        }
        Some(other) => {
            eprintln!("Unknown command '{other}'. Expected one of: up, fresh, clean");
            process::exit(2);
        }
    };

    if let Err(e) = outcome {
        eprintln!("Migration failed: {e}");
        process::exit(1);
    }
}

fn is_file_path(path: &str) -> bool {
    !path.contains("://") && !path.starts_with("sqlite:")
}

fn remove_db_file(path: &str) {
    if !is_file_path(path) {
        println!("DATABASE_PATH is a DSN; nothing to delete");
        return;
    }
    let db_path = Path::new(path);
    if db_path.exists() {
        match fs::remove_file(db_path) {
            Ok(()) => println!("Deleted DB: {}", db_path.display()),
            Err(e) => {
                eprintln!("Failed to delete {}: {e}", db_path.display());
                process::exit(1);
            }
        }
    } else {
        println!("DB file does not exist: {}", db_path.display());
    }
}

fn create_db_dir(path: &str) {
    if is_file_path(path) {
        if let Err(e) = paths::ensure_parent_dir(path) {
            eprintln!("Failed to create DB directory: {e}");
            process::exit(1);
        }
    }
}
