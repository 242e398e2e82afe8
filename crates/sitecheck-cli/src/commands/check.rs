use sitecheck_core::{Session, ThreatLookup};

use crate::commands::common::{
    check_to_item, format_check_line, format_invalid_line, invalid_to_item, open_session,
    CheckItem,
};
use crate::error::CliError;

/// One checked input, rendered for both output modes.
#[derive(Debug)]
pub struct CheckOutcome {
    pub item: CheckItem,
    pub line: String,
}

impl CheckOutcome {
    pub fn is_safe(&self) -> bool {
        self.item.status == "safe"
    }
}

pub async fn run_check(
    urls: &[String],
    as_json: bool,
    timeout_secs: Option<u64>,
) -> Result<(), CliError> {
    let mut session = open_session(timeout_secs)?;
    let outcomes = check_urls(&mut session, urls).await;

    if as_json {
        let json_items = outcomes
            .iter()
            .map(|outcome| &outcome.item)
            .collect::<Vec<&CheckItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for outcome in &outcomes {
            println!("{}", outcome.line);
        }
    }

    let failed = outcomes.iter().filter(|outcome| !outcome.is_safe()).count();
    if failed > 0 {
        return Err(CliError::NotAllSafe {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}

/// Checks each URL in order, one lookup at a time.
pub async fn check_urls<L: ThreatLookup>(
    session: &mut Session<L>,
    urls: &[String],
) -> Vec<CheckOutcome> {
    let mut outcomes = Vec::with_capacity(urls.len());
    for raw in urls {
        let outcome = match session.check(raw).await {
            Ok(entry) => CheckOutcome {
                item: check_to_item(raw, entry),
                line: format_check_line(entry),
            },
            Err(error) => CheckOutcome {
                item: invalid_to_item(raw, &error),
                line: format_invalid_line(raw, &error),
            },
        };
        outcomes.push(outcome);
    }
    outcomes
}
