use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use medidoc::config::AppConfig;
use medidoc::onboarding::prompts::{
    NEXT_LABEL, SHEET_CLOSE, SHEET_SELECT_FROM_DEVICE, SHEET_USE_DEFAULT,
};
use medidoc::onboarding::widgets::SheetOption;
use medidoc::onboarding::{
    BirthDateField, Choice, FsPreviewDecoder, Gender, Language, OnboardingEvent,
    OnboardingManager, OnboardingSeed, StepOutcome, StepView, VisitPurpose, WidgetKind,
};
use medidoc::registration::{HttpRegistrar, LogRegistrar, Registrar, RegistrationReceipt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env();

    eprintln!("medidoc onboarding v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: {}", config.api_base_url);

    let registrar: Arc<dyn Registrar> = if config.google_credential.is_some() {
        eprintln!("   Registration: {}/auth/register", config.api_base_url);
        Arc::new(HttpRegistrar::from_config(&config)?)
    } else {
        eprintln!("   Registration: log only (MEDIDOC_GOOGLE_CREDENTIAL not set)");
        Arc::new(LogRegistrar)
    };
    let decoder = Arc::new(FsPreviewDecoder::new(config.max_image_bytes));

    let seed = OnboardingSeed {
        language: std::env::var("MEDIDOC_LANGUAGE")
            .ok()
            .and_then(|id| Language::from_id(&id)),
        ..Default::default()
    };
    let mut manager = OnboardingManager::new(seed, registrar, decoder);

    eprintln!("   Type an answer and press Enter. An empty line presses Next. /quit to exit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    render(manager.view());

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if matches!(line, "/quit" | "/exit") {
            break;
        }

        let outcome = apply_line(&mut manager, line).await;
        if let Some(result) = outcome.registration {
            match result {
                Ok(RegistrationReceipt::Registered(user)) => {
                    println!("Welcome, user #{} ({})", user.user.id, user.user.email);
                }
                Ok(RegistrationReceipt::Recorded) => {
                    println!("{}", serde_json::to_string_pretty(manager.answers())?);
                }
                Err(e) => eprintln!("Registration failed: {e}"),
            }
        }

        if manager.is_complete() {
            break;
        }
        render(manager.view());
    }

    Ok(())
}

/// Translate one line of terminal input into wizard events.
async fn apply_line(manager: &mut OnboardingManager, line: &str) -> StepOutcome {
    if line.is_empty() {
        return manager.handle(OnboardingEvent::Next).await;
    }

    let Some(view) = manager.view() else {
        return StepOutcome::default();
    };

    match view.widget {
        WidgetKind::LanguageSelector => match pick::<Language>(&view, line) {
            Some(choice) => manager.handle(OnboardingEvent::LanguageSelected(choice)).await,
            None => StepOutcome::default(),
        },
        WidgetKind::GenderSelector => match pick::<Gender>(&view, line) {
            Some(choice) => manager.handle(OnboardingEvent::GenderSelected(choice)).await,
            None => StepOutcome::default(),
        },
        WidgetKind::VisitPurposeSelector => match pick::<VisitPurpose>(&view, line) {
            Some(choice) => {
                manager
                    .handle(OnboardingEvent::VisitPurposeSelected(choice))
                    .await
            }
            None => StepOutcome::default(),
        },
        WidgetKind::PhoneInput => {
            manager.handle(OnboardingEvent::PhoneInput(line.to_string())).await;
            manager.handle(OnboardingEvent::KeyEnter).await
        }
        WidgetKind::NicknameInput => {
            manager
                .handle(OnboardingEvent::NicknameInput(line.to_string()))
                .await;
            manager.handle(OnboardingEvent::KeyEnter).await
        }
        WidgetKind::BirthDateInput => {
            let fields = [BirthDateField::Year, BirthDateField::Month, BirthDateField::Day];
            for (field, raw) in fields.into_iter().zip(split_birth_date(line)) {
                manager
                    .handle(OnboardingEvent::BirthDateInput { field, raw })
                    .await;
            }
            manager.handle(OnboardingEvent::KeyEnter).await
        }
        WidgetKind::ProfileImageInput => {
            manager.handle(OnboardingEvent::OpenImageSheet).await;
            match line {
                "default" => {
                    manager
                        .handle(OnboardingEvent::ImageSheet(SheetOption::UseDefault))
                        .await
                }
                "close" => {
                    manager
                        .handle(OnboardingEvent::ImageSheet(SheetOption::Close))
                        .await
                }
                path => {
                    let picked = manager
                        .handle(OnboardingEvent::ImageSheet(SheetOption::SelectFromDevice))
                        .await;
                    if !picked.pick_file {
                        return picked;
                    }
                    let Some(pending) = manager
                        .handle(OnboardingEvent::ImagePicked(PathBuf::from(path)))
                        .await
                        .decode
                    else {
                        return StepOutcome::default();
                    };
                    match tokio::spawn(manager.decode_task(pending)).await {
                        Ok(decoded) => manager.handle(decoded).await,
                        Err(e) => {
                            tracing::error!("Image decode task failed: {}", e);
                            StepOutcome::default()
                        }
                    }
                }
            }
        }
    }
}

/// Split "YYYY MM DD" (or `-`, `/`, `.` separated) into its three parts.
/// Runs of separators count as one; missing parts come back empty.
fn split_birth_date(line: &str) -> [String; 3] {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || "-/.".contains(c))
        .filter(|s| !s.is_empty());
    std::array::from_fn(|_| parts.next().unwrap_or_default().to_string())
}

/// Resolve a selector line: an option id or its 1-based number.
fn pick<T: Choice>(view: &StepView, line: &str) -> Option<T> {
    let id = match line.parse::<usize>() {
        Ok(n) if n >= 1 => view.options.get(n - 1).map(|o| o.id)?,
        _ => line,
    };
    T::from_id(&id.to_lowercase())
}

fn render(view: Option<StepView>) {
    let Some(view) = view else {
        return;
    };

    println!("\n[{}/{}]", view.step_number, view.step_count);
    for line in &view.prompt_lines {
        println!("{line}");
    }

    for (i, option) in view.options.iter().enumerate() {
        let mark = if option.selected { "x" } else { " " };
        println!("  {}. [{mark}] {}", i + 1, option.label);
    }

    match view.widget {
        WidgetKind::BirthDateInput => println!("  YYYY MM DD"),
        WidgetKind::ProfileImageInput => {
            println!("  preview: {}", view.preview.unwrap_or("placeholder"));
            println!("  <path>   {SHEET_SELECT_FROM_DEVICE}");
            println!("  default  {SHEET_USE_DEFAULT}");
            println!("  close    {SHEET_CLOSE}");
        }
        _ => {}
    }

    match (view.value.as_deref().filter(|v| !v.is_empty()), view.placeholder) {
        (Some(value), _) => println!("  > {value}"),
        (None, Some(placeholder)) => println!("  > ({placeholder})"),
        (None, None) => {}
    }
    if let Some(helper) = view.helper.or(view.caption) {
        let marker = if view.has_error { "!" } else { " " };
        println!(" {marker}{helper}");
    }

    let next = if view.can_advance { "enabled" } else { "disabled" };
    eprint!("({NEXT_LABEL} {next}) > ");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn birth_date_line_ignores_repeated_separators() {
        assert_eq!(split_birth_date("1990  4 15"), ["1990", "4", "15"]);
        assert_eq!(split_birth_date("1990-04-15"), ["1990", "04", "15"]);
        assert_eq!(split_birth_date(" 1990 / 4 /15 "), ["1990", "4", "15"]);
    }

    #[test]
    fn birth_date_line_missing_parts_are_empty() {
        assert_eq!(split_birth_date("1990"), ["1990", "", ""]);
        assert_eq!(split_birth_date(""), ["", "", ""]);
    }
}
