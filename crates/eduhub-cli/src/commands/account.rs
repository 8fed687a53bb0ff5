//! signup, login and logout.

use anyhow::Result;
use eduhub_core::user::{LoginForm, RoleDetails, SignupForm, UserRole};
use serde_json::json;

use super::{LoginArgs, SignupArgs, emit};
use crate::bootstrap::App;

impl SignupArgs {
    fn into_form(self) -> SignupForm {
        let details = match self.role {
            UserRole::Student => RoleDetails::Student {
                age: self.age,
                grade: self.grade.unwrap_or_default(),
                school_name: self.school_name.unwrap_or_default(),
            },
            UserRole::Teacher => RoleDetails::Teacher {
                teaching_grades: self.teaching_grades,
                teaching_school: self.teaching_school.unwrap_or_default(),
            },
            UserRole::School => RoleDetails::School {
                ceo_name: self.ceo_name.unwrap_or_default(),
            },
        };

        SignupForm {
            email: self.email,
            password: self.password,
            name: self.name,
            phone_number: self.phone,
            location: self.location,
            details,
        }
    }
}

pub async fn signup(app: &App, args: SignupArgs) -> Result<()> {
    let form = args.into_form();
    let uid = app.auth.sign_up(&form).await?;
    let profile = app.session().state().profile;

    emit(app, &json!({ "uid": uid, "profile": profile }), || {
        println!("Account created for {} ({})", form.name, form.role().display_name());
        println!("uid: {}", uid);
        println!("Run `eduhub login --remember-me` to stay signed in.");
    })
}

pub async fn login(app: &App, args: LoginArgs) -> Result<()> {
    let form = LoginForm::new(args.email, args.password, args.remember_me);
    let state = app.auth.log_in(&form).await?;

    emit(app, &state, || match &state.profile {
        Some(profile) => {
            println!("Signed in as {} ({})", profile.name, profile.role.display_name());
            if !form.remember_me {
                println!("Not remembered: the next run starts signed out.");
            }
        }
        None => println!("Signed in, but no profile exists for this account."),
    })
}

pub async fn logout(app: &App) -> Result<()> {
    let was_signed_in = app.session().wait_until_loaded().await?.identity.is_some();
    app.auth.log_out().await?;

    emit(app, &json!({ "signed_out": was_signed_in }), || {
        if was_signed_in {
            println!("Signed out.");
        } else {
            println!("Nobody was signed in.");
        }
    })
}
