use anyhow::{Context, Result};
use inquire::{Confirm, Select, Text};
use log::info;
use wecast::core::config::Config;
use wecast::core::speaker::{Gender, Role};
use wecast::core::style::{Style, ALL_STYLES};
use wecast::core::validate::{field, role_guidance};
use wecast::core::wizard::{Step, WizardSession};
use wecast::services::gateway::{create_backend, BackendClient};
use wecast::services::voices::auto_assign;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = Config::load()?;
    let backend = create_backend(&config)?;

    println!("WeCast — create a podcast episode ({})", config.base_url);

    match backend.fetch_draft().await {
        Ok(Some(draft)) => println!(
            "Previous draft on the backend: \"{}\" ({}). Generating will replace it.",
            draft.title.as_deref().unwrap_or("untitled"),
            draft.script_style
        ),
        Ok(None) => {}
        Err(e) => log::debug!("No draft available: {:#}", e),
    }

    let voices = backend.voices().await;
    if voices.is_empty() {
        println!("Voice catalog unavailable; continuing without voice selection.");
    } else {
        info!("Loaded {} voices", voices.len());
    }

    let mut session = WizardSession::new();

    loop {
        match session.step() {
            Step::Style => {
                let style = Select::new("Podcast style:", ALL_STYLES.to_vec()).prompt()?;
                println!("  {}", style.default_role_description());
                println!("  {}", style.valid_setups());
                session.set_style(style);
                session.advance();
            }
            Step::Speakers => {
                let style = session.style().context("style not selected")?;
                let count = Select::new(
                    "How many speakers?",
                    style.allowed_counts().to_vec(),
                )
                .prompt()?;
                session.set_speaker_count(count);

                for i in 0..count {
                    prompt_speaker(&mut session, i)?;
                }
                println!("  {}", role_guidance(style, session.roster()));

                if !session.advance() {
                    print_errors(&session);
                }
            }
            Step::Text => {
                let path = Text::new("Path to your source text:")
                    .with_default(config.description_file.as_deref().unwrap_or("episode.txt"))
                    .prompt()?;
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path))?;
                session.set_description(text);
                if !session.advance() {
                    print_errors(&session);
                }
            }
            Step::Review => {
                print_summary(&session);
                if !Confirm::new("Generate the script now?")
                    .with_default(true)
                    .prompt()?
                {
                    session.back();
                    continue;
                }
                match submit(&mut session, backend.as_ref(), &voices).await {
                    Ok(()) => break,
                    Err(e) => {
                        eprintln!("{}", e);
                        print_errors(&session);
                        // Server-side description rejection sends the
                        // user back to the text step, as the web flow
                        // does.
                        if session.errors().get(field::DESCRIPTION).is_some() {
                            session.back();
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn prompt_speaker(session: &mut WizardSession, index: usize) -> Result<()> {
    let current = session.roster().speakers()[index].clone();

    let name = Text::new(&format!("Speaker {} name:", index + 1))
        .with_default(&current.name)
        .prompt()?;
    session.set_speaker_name(index, &name);

    let gender = Select::new(
        &format!("Speaker {} gender:", index + 1),
        vec!["Male", "Female"],
    )
    .prompt()?;
    session.set_speaker_gender(
        index,
        if gender == "Female" { Gender::Female } else { Gender::Male },
    );

    let default_role = match current.role {
        Role::Host => "host",
        Role::Guest => "guest",
    };
    let role = Select::new(
        &format!("Speaker {} role (suggested: {}):", index + 1, default_role),
        vec!["host", "guest"],
    )
    .prompt()?;
    session.set_speaker_role(index, if role == "guest" { Role::Guest } else { Role::Host });

    Ok(())
}

fn print_errors(session: &WizardSession) {
    for (field, message) in &session.errors().0 {
        eprintln!("  [{}] {}", field, message);
    }
}

fn print_summary(session: &WizardSession) {
    let style = session
        .style()
        .map(|s| s.to_string())
        .unwrap_or_default();
    println!("Style: {}", style);
    for s in session.roster().speakers() {
        let role = match s.role {
            Role::Host => "host",
            Role::Guest => "guest",
        };
        println!("  - {} ({:?}, {})", s.name, s.gender, role);
    }
    println!(
        "Description: {} words",
        wecast::core::validate::count_words(session.description())
    );
}

async fn submit(
    session: &mut WizardSession,
    backend: &dyn BackendClient,
    voices: &[wecast::services::voices::Voice],
) -> Result<()> {
    let mut payload = session.payload().context("Session failed validation")?;
    auto_assign(&mut payload.speakers_info, voices);

    println!("Generating script...");
    match backend.generate(&payload).await {
        Ok(resp) => {
            if let Some(title) = &resp.title {
                println!("\n== {} ==\n", title);
            }
            println!("{}", resp.script);

            // The backend already keeps the draft from /api/generate;
            // saving the script mirrors the edit view's save action.
            if let Err(e) = backend.save_edit(&resp.script).await {
                log::warn!("Script not saved: {:#}", e);
            }
            Ok(())
        }
        Err(e) => {
            e.apply_to(session.errors_mut());
            Err(anyhow::anyhow!("Generation failed: {}", e))
        }
    }
}
