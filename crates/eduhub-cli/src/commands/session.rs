//! whoami, route and demo.

use anyhow::Result;
use eduhub_core::routing::{Navigation, Route, RouteDecision, RouteGuard, user_menu_label};
use eduhub_core::session::{DemoEndReason, SessionEvent, SessionState};
use serde_json::json;
use tokio::sync::broadcast::error::RecvError;

use super::{DemoArgs, RouteArgs, emit, format_countdown};
use crate::bootstrap::App;

async fn resolved_state(app: &App) -> Result<SessionState> {
    let state = app
        .session()
        .wait_for(|state| !state.loading && !state.resolving)
        .await?;
    Ok(state)
}

fn print_navigation(nav: &Navigation) {
    let main: Vec<&str> = nav.main.iter().map(|item| item.label).collect();
    println!("Menu: {}", main.join(" | "));
    for section in &nav.sections {
        println!("{}:", section.title);
        for item in &section.items {
            match item.description {
                Some(description) => println!("  {} ({}) - {}", item.label, item.path, description),
                None => println!("  {} ({})", item.label, item.path),
            }
        }
    }
}

pub async fn whoami(app: &App) -> Result<()> {
    let state = resolved_state(app).await?;
    let navigation = Navigation::for_session(&state);

    let report = json!({
        "status": state.auth_status(),
        "identity": state.identity,
        "profile": state.profile,
        "navigation": navigation,
    });

    emit(app, &report, || {
        let Some(identity) = &state.identity else {
            println!("Not signed in.");
            return;
        };
        println!("Signed in: {}", identity.email.as_deref().unwrap_or(&identity.uid));

        match &state.profile {
            Some(profile) => {
                println!("{} [{}] {}", profile.initials(), user_menu_label(&state), profile.role.display_name());
                println!("Phone: {}  Location: {}", profile.phone_number, profile.location);
                println!();
                println!("{}", profile.welcome_message());
                println!();
                print_navigation(&navigation);
            }
            None => println!("No profile record for uid {}.", identity.uid),
        }
        println!();
        println!("Data directory: {}", app.paths.data_dir().display());
    })
}

pub async fn route(app: &App, args: RouteArgs) -> Result<()> {
    resolved_state(app).await?;
    if let Some(role) = args.demo {
        app.auth.start_demo(role);
    }

    let state = app.session().state();
    let route = Route::parse(&args.path);
    let decision = RouteGuard::decide(&route, &state);

    emit(app, &json!({ "path": args.path, "decision": decision }), || match &decision {
        RouteDecision::Loading => println!("{} -> loading", args.path),
        RouteDecision::Redirect(target) => println!("{} -> redirect to {}", args.path, target),
        RouteDecision::Render(target) => println!("{} -> render {}", args.path, target),
        RouteDecision::NotFound => println!("{} -> not found", args.path),
    })
}

pub async fn demo(app: &App, args: DemoArgs) -> Result<()> {
    let mut events = app.session().events();
    resolved_state(app).await?;
    app.auth.start_demo(args.role);

    let state = app.session().state();
    let remaining = state.demo_seconds_remaining();
    emit(
        app,
        &json!({ "role": args.role, "remaining": remaining, "navigation": Navigation::for_session(&state) }),
        || {
            println!(
                "Demo started as {} ({} remaining)",
                args.role.display_name(),
                format_countdown(remaining)
            );
            if let Some(profile) = &state.profile {
                println!("{}", profile.welcome_message());
            }
            print_navigation(&Navigation::for_session(&state));
        },
    )?;

    if !args.watch {
        return Ok(());
    }

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(SessionEvent::DemoTick { remaining }) => {
                    if app.json {
                        println!("{}", json!({ "remaining": remaining }));
                    } else {
                        println!("Demo time remaining: {}", format_countdown(remaining));
                    }
                }
                Ok(SessionEvent::DemoEnded { reason }) => {
                    report_end(app, reason);
                    break;
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Skipped {} session events", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                if app.auth.end_demo() {
                    report_end(app, DemoEndReason::Ended);
                }
                break;
            }
        }
    }

    Ok(())
}

fn report_end(app: &App, reason: DemoEndReason) {
    if app.json {
        println!("{}", json!({ "ended": reason }));
        return;
    }
    match reason {
        DemoEndReason::Expired => println!("Demo time is up. Sign up to keep going."),
        DemoEndReason::Ended => println!("Demo ended."),
    }
}
