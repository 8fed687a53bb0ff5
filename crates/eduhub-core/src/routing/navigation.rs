//! Role-based navigation menus.

use serde::Serialize;

use crate::session::SessionState;
use crate::user::UserRole;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

impl NavItem {
    const fn link(label: &'static str, path: &'static str) -> Self {
        Self {
            label,
            path,
            description: None,
        }
    }

    const fn tool(label: &'static str, path: &'static str, description: &'static str) -> Self {
        Self {
            label,
            path,
            description: Some(description),
        }
    }

    /// Whether this entry should be highlighted for `current_path`.
    pub fn is_current(&self, current_path: &str) -> bool {
        self.path == current_path
    }
}

/// A titled group of role-only entries (e.g. "Teacher Tools").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavSection {
    pub title: &'static str,
    pub items: Vec<NavItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub main: Vec<NavItem>,
    pub sections: Vec<NavSection>,
}

const MAIN_MENU: [NavItem; 5] = [
    NavItem::link("Home", "/home"),
    NavItem::link("Video", "/video"),
    NavItem::link("Messaging", "/messaging"),
    NavItem::link("Books & Worksheets", "/books"),
    NavItem::link("Profile", "/profile"),
];

impl Navigation {
    /// Menu for `role`; without a profile the student menu is used.
    pub fn for_role(role: Option<UserRole>) -> Self {
        let sections = match role.unwrap_or(UserRole::Student) {
            UserRole::Student => Vec::new(),
            UserRole::Teacher => vec![NavSection {
                title: "Teacher Tools",
                items: vec![
                    NavItem::tool(
                        "Assignments",
                        "/teacher/assignments",
                        "Create and manage student assignments",
                    ),
                    NavItem::tool("Grades", "/teacher/grades", "Track and manage student grades"),
                ],
            }],
            UserRole::School => vec![NavSection {
                title: "School Admin",
                items: vec![
                    NavItem::tool(
                        "Manage Teachers",
                        "/school/teachers",
                        "View and manage school teachers",
                    ),
                    NavItem::tool(
                        "Manage Students",
                        "/school/students",
                        "View and manage school students",
                    ),
                ],
            }],
        };

        Self {
            main: MAIN_MENU.to_vec(),
            sections,
        }
    }

    /// Menu for whoever the session currently shows.
    pub fn for_session(state: &SessionState) -> Self {
        Self::for_role(state.profile.as_ref().map(|p| p.role))
    }
}

/// Name shown on the user menu button.
pub fn user_menu_label(state: &SessionState) -> String {
    if state.is_demo_active() {
        return "Demo User".to_string();
    }
    state
        .profile
        .as_ref()
        .map(|p| p.name.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "User".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DemoState;
    use crate::user::UserProfile;

    #[test]
    fn test_student_gets_main_menu_only() {
        let nav = Navigation::for_role(Some(UserRole::Student));
        assert_eq!(nav.main.len(), 5);
        assert!(nav.sections.is_empty());
        assert_eq!(nav.main[3].label, "Books & Worksheets");
        assert!(nav.main[0].is_current("/home"));
    }

    #[test]
    fn test_teacher_and_school_sections() {
        let teacher = Navigation::for_role(Some(UserRole::Teacher));
        assert_eq!(teacher.sections[0].title, "Teacher Tools");
        assert_eq!(teacher.sections[0].items[1].path, "/teacher/grades");

        let school = Navigation::for_role(Some(UserRole::School));
        assert_eq!(school.sections[0].title, "School Admin");
        assert_eq!(school.sections[0].items[0].path, "/school/teachers");
    }

    #[test]
    fn test_no_profile_falls_back_to_student_menu() {
        assert_eq!(
            Navigation::for_role(None),
            Navigation::for_role(Some(UserRole::Student))
        );
    }

    #[test]
    fn test_user_menu_label() {
        let mut state = SessionState::initial(600);
        assert_eq!(user_menu_label(&state), "User");

        state.profile = Some(UserProfile::demo(UserRole::Teacher));
        state.demo = DemoState::Active { remaining: 10 };
        assert_eq!(user_menu_label(&state), "Demo User");
        assert_eq!(
            Navigation::for_session(&state).sections[0].title,
            "Teacher Tools"
        );

        state.demo = DemoState::Inactive;
        assert_eq!(user_menu_label(&state), "Demo Teacher");
    }
}
