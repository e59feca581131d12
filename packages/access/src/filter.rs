//! Tab and search filtering for the access table.

use std::fmt;
use std::str::FromStr;

use crate::models::UserRecord;

/// Which slice of the user list is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewTab {
    #[default]
    All,
    Admins,
    Applicants,
    Archived,
}

impl ViewTab {
    pub const ALL: [ViewTab; 4] = [
        ViewTab::All,
        ViewTab::Admins,
        ViewTab::Applicants,
        ViewTab::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewTab::All => "all",
            ViewTab::Admins => "admins",
            ViewTab::Applicants => "applicants",
            ViewTab::Archived => "archived",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewTab::All => "All Users",
            ViewTab::Admins => "Admins",
            ViewTab::Applicants => "Applicants",
            ViewTab::Archived => "Archived",
        }
    }

    /// Base predicate applied before the search query.
    pub fn admits(&self, user: &UserRecord) -> bool {
        match self {
            ViewTab::Archived => user.is_archived,
            _ if user.is_archived => false,
            ViewTab::All => true,
            ViewTab::Admins => user.is_admin,
            ViewTab::Applicants => !user.is_admin,
        }
    }
}

impl fmt::Display for ViewTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewTab::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| format!("unknown tab: {s}"))
    }
}

/// Case-insensitive substring match against "first last email".
pub fn matches_search(user: &UserRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    user.search_text()
        .to_lowercase()
        .contains(&query.to_lowercase())
}

/// Records visible for `tab` and `query`, in cache order.
pub fn filter_users<'a>(users: &'a [UserRecord], tab: ViewTab, query: &str) -> Vec<&'a UserRecord> {
    users
        .iter()
        .filter(|user| tab.admits(user) && matches_search(user, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, first: &str, is_admin: bool, is_archived: bool) -> UserRecord {
        UserRecord {
            id,
            first_name: first.to_string(),
            last_name: "Smith".to_string(),
            email: format!("{}@launchpad.test", first.to_lowercase()),
            is_admin,
            is_archived,
            program: None,
            applications: None,
        }
    }

    fn fixture() -> Vec<UserRecord> {
        vec![
            user(1, "Alice", true, false),
            user(2, "Bob", false, false),
            user(3, "Carol", false, true),
            user(4, "Dave", true, true),
        ]
    }

    fn ids(users: Vec<&UserRecord>) -> Vec<i64> {
        users.into_iter().map(|u| u.id).collect()
    }

    #[test]
    fn test_archived_tab_with_empty_search_returns_only_archived() {
        let users = vec![
            user(1, "Alice", false, false),
            user(2, "Bob", false, true),
            user(3, "Carol", true, false),
        ];
        assert_eq!(ids(filter_users(&users, ViewTab::Archived, "")), vec![2]);
    }

    #[test]
    fn test_tabs_partition_by_role_and_lifecycle() {
        let users = fixture();
        assert_eq!(ids(filter_users(&users, ViewTab::All, "")), vec![1, 2]);
        assert_eq!(ids(filter_users(&users, ViewTab::Admins, "")), vec![1]);
        assert_eq!(ids(filter_users(&users, ViewTab::Applicants, "")), vec![2]);
        assert_eq!(ids(filter_users(&users, ViewTab::Archived, "")), vec![3, 4]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_email() {
        let users = fixture();
        assert_eq!(ids(filter_users(&users, ViewTab::All, "ALICE")), vec![1]);
        assert_eq!(ids(filter_users(&users, ViewTab::All, "bob@launchpad")), vec![2]);
        assert_eq!(ids(filter_users(&users, ViewTab::All, "smith")), vec![1, 2]);
        assert_eq!(ids(filter_users(&users, ViewTab::All, "alice smith")), vec![1]);
        assert!(filter_users(&users, ViewTab::All, "zed").is_empty());
    }

    #[test]
    fn test_archived_records_appear_only_in_archived_tab() {
        let users = fixture();
        for tab in ViewTab::ALL {
            for query in ["", "a", "smith", "launchpad", "x"] {
                for shown in filter_users(&users, tab, query) {
                    assert_eq!(shown.is_archived, tab == ViewTab::Archived);
                }
            }
        }
    }

    #[test]
    fn test_filter_equals_declarative_predicate() {
        let users = fixture();
        for tab in ViewTab::ALL {
            for query in ["", "CAROL", "dave", "@", "bob smith"] {
                let expected: Vec<i64> = users
                    .iter()
                    .filter(|u| {
                        let base = if tab == ViewTab::Archived {
                            u.is_archived
                        } else {
                            !u.is_archived
                                && match tab {
                                    ViewTab::Admins => u.is_admin,
                                    ViewTab::Applicants => !u.is_admin,
                                    _ => true,
                                }
                        };
                        base && u.search_text().to_lowercase().contains(&query.to_lowercase())
                    })
                    .map(|u| u.id)
                    .collect();
                assert_eq!(ids(filter_users(&users, tab, query)), expected, "{tab} / {query}");
            }
        }
    }

    #[test]
    fn test_tab_parse_roundtrip() {
        for tab in ViewTab::ALL {
            assert_eq!(tab.as_str().parse::<ViewTab>().unwrap(), tab);
        }
        assert!("owners".parse::<ViewTab>().is_err());
    }
}
