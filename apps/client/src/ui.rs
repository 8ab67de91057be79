//! Interactive terminal screens: auth, intake questions, roadmap.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};
use tracing::info;

use roadmap_client::auth::{sign_out, AuthForm, Banner, RESEND_SUCCESS_MESSAGE};
use roadmap_client::display::{render_progress, render_roadmap};
use roadmap_client::intake::{IntakeAnswers, IntakeFlow, IntakeState};
use roadmap_client::provider::AuthProvider;
use roadmap_client::roadmap::RoadmapClient;
use roadmap_client::session::SessionStore;

#[derive(Debug, Clone, Copy)]
enum AuthAction {
    Submit,
    ToggleMode,
    Resend,
    Quit,
}

#[derive(Debug, Clone, Copy)]
enum RoadmapAction {
    NewRoadmap,
    Retry,
    SignOut,
    Quit,
}

impl RoadmapAction {
    fn label(self) -> &'static str {
        match self {
            RoadmapAction::NewRoadmap => "New Roadmap",
            RoadmapAction::Retry => "Retry",
            RoadmapAction::SignOut => "Sign Out",
            RoadmapAction::Quit => "Quit",
        }
    }
}

enum Exit {
    SignedOut,
    Quit,
}

pub async fn run(
    provider: &dyn AuthProvider,
    client: &RoadmapClient,
    sessions: &SessionStore,
    strict: bool,
) -> Result<()> {
    let theme = ColorfulTheme::default();

    let mut subscription = sessions.subscribe();
    let watcher = tokio::spawn(async move {
        while let Some(user) = subscription.changed().await {
            match user {
                Some(user) => info!("Auth state changed: signed in as {}", user.id),
                None => info!("Auth state changed: signed out"),
            }
        }
    });

    loop {
        if sessions.current_user().is_none() {
            if !auth_screen(&theme, provider, sessions).await? {
                break;
            }
            continue;
        }
        match roadmap_screen(&theme, provider, client, sessions, strict).await? {
            Exit::SignedOut => continue,
            Exit::Quit => break,
        }
    }

    watcher.abort();
    Ok(())
}

/// Returns `true` once signed in, `false` if the user quit.
async fn auth_screen(
    theme: &ColorfulTheme,
    provider: &dyn AuthProvider,
    sessions: &SessionStore,
) -> Result<bool> {
    let mut form = AuthForm::new();

    loop {
        println!("\n{}", form.mode().title().bold());
        match form.banner() {
            Some(Banner::Error(text)) => println!("{}", text.red()),
            Some(Banner::Notice(text)) => println!("{}", text.green()),
            None => {}
        }
        if form.resend_success() {
            println!("{}", RESEND_SUCCESS_MESSAGE.green());
        }

        let mut actions = vec![
            (AuthAction::Submit, form.mode().action()),
            (AuthAction::ToggleMode, form.mode().toggle_label()),
        ];
        if form.show_resend() {
            actions.push((AuthAction::Resend, "Resend Confirmation Email"));
        }
        actions.push((AuthAction::Quit, "Quit"));

        let labels: Vec<&str> = actions.iter().map(|(_, label)| *label).collect();
        let choice = Select::with_theme(theme)
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[choice].0 {
            AuthAction::Submit => {
                form.email = Input::<String>::with_theme(theme)
                    .with_prompt("Email")
                    .with_initial_text(form.email.clone())
                    .interact_text()?;
                form.password = Password::with_theme(theme)
                    .with_prompt("Password")
                    .interact()?;
                println!("{}", "Loading...".dimmed());
                if form.submit(provider, sessions).await {
                    return Ok(true);
                }
            }
            AuthAction::ToggleMode => form.toggle_mode(),
            AuthAction::Resend => {
                println!("{}", "Sending...".dimmed());
                form.resend_confirmation(provider).await;
            }
            AuthAction::Quit => return Ok(false),
        }
    }
}

async fn roadmap_screen(
    theme: &ColorfulTheme,
    provider: &dyn AuthProvider,
    client: &RoadmapClient,
    sessions: &SessionStore,
    strict: bool,
) -> Result<Exit> {
    let mut flow = IntakeFlow::new();
    println!("\n{}", "Your Educational Journey Starts Here".bold());
    println!("Let's create your personalized learning roadmap together");

    loop {
        let actions: &[RoadmapAction] = match flow.state().clone() {
            IntakeState::Question(_) => {
                let (Some(question), Some((step, total))) =
                    (flow.current_question(), flow.progress())
                else {
                    continue;
                };
                println!("\n{}", render_progress(step, total));
                println!("{}", question.placeholder.dimmed());
                let answer = Input::<String>::with_theme(theme)
                    .with_prompt(question.prompt)
                    .allow_empty(true)
                    .interact_text()?;
                if let Some(answers) = flow.submit(&answer) {
                    generate(client, &mut flow, &answers, strict).await;
                }
                continue;
            }
            IntakeState::Loading => {
                if let Some(answers) = flow.answers().cloned() {
                    generate(client, &mut flow, &answers, strict).await;
                }
                continue;
            }
            IntakeState::ShowingRoadmap(roadmap) => {
                if let Some(answers) = flow.answers() {
                    println!("\n{}", render_roadmap(&roadmap, answers));
                }
                &[
                    RoadmapAction::NewRoadmap,
                    RoadmapAction::SignOut,
                    RoadmapAction::Quit,
                ]
            }
            IntakeState::Failed(message) => {
                println!("\n{}", format!("Could not generate your roadmap: {message}").red());
                &[
                    RoadmapAction::Retry,
                    RoadmapAction::NewRoadmap,
                    RoadmapAction::SignOut,
                    RoadmapAction::Quit,
                ]
            }
        };

        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let choice = Select::with_theme(theme)
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[choice] {
            RoadmapAction::NewRoadmap => flow.reset(),
            RoadmapAction::Retry => {
                if let Some(answers) = flow.retry() {
                    generate(client, &mut flow, &answers, strict).await;
                }
            }
            RoadmapAction::SignOut => {
                sign_out(provider, sessions).await;
                return Ok(Exit::SignedOut);
            }
            RoadmapAction::Quit => return Ok(Exit::Quit),
        }
    }
}

async fn generate(client: &RoadmapClient, flow: &mut IntakeFlow, answers: &IntakeAnswers, strict: bool) {
    println!("\n{}", "Generating your personalized roadmap...".purple());
    let result = if strict {
        client.try_generate(answers).await.map_err(|e| e.to_string())
    } else {
        Ok(client.generate(answers).await)
    };
    flow.complete(result);
}
