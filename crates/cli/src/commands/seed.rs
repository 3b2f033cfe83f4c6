use crate::commands::{prepare, CommandResult};
use menubot_db::repositories::SqlCatalogueRepository;
use menubot_db::{connect_with_config, migrations, DemoCatalogue, SeedResult};

pub fn run() -> CommandResult {
    let (config, runtime) = match prepare("seed") {
        Ok(prepared) => prepared,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let pool = connect_with_config(&config.database)
            .await
            .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;

        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;

        let repository = SqlCatalogueRepository::new(pool.clone());
        let seed_result = DemoCatalogue::load(&repository, &config.catalogue.id)
            .await
            .map_err(|error| ("seed_execution", error.to_string(), 5u8))?;

        let verification = DemoCatalogue::verify(&pool, &config.catalogue.id)
            .await
            .map_err(|error| ("seed_verification", error.to_string(), 6u8))?;

        let run_result = if verification.all_passed() {
            Ok(seed_result)
        } else {
            Err((
                "seed_verification",
                verification_message(verification.expected, verification.stored),
                6u8,
            ))
        };

        pool.close().await;
        run_result
    });

    match result {
        Ok(seed_result) => CommandResult::success("seed", seed_message(&seed_result)),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}

fn seed_message(result: &SeedResult) -> String {
    format!(
        "demo catalogue `{}` loaded with {} items:\n{}",
        result.catalogue_id,
        result.items_seeded,
        result
            .selections
            .iter()
            .map(|selection| format!("  - {selection}"))
            .collect::<Vec<_>>()
            .join("\n")
    )
}

fn verification_message(expected: i64, stored: i64) -> String {
    format!("seed verification failed: expected {expected} catalogue items, found {stored}")
}
