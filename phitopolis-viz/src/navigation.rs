//! Page and tab selection
//!
//! The site is a single document; which view is visible is plain state held
//! by a [`Navigator`], and whoever renders the views hands in an `on_change`
//! callback.

use std::fmt;

/// Top-level pages reachable from the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Expertise,
    Careers,
    Contact,
}

/// A rendered view (several pages share the home view)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Careers,
}

impl View {
    /// Value of the `data-view` attribute on the section
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Careers => "careers",
        }
    }
}

impl Page {
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Expertise => "expertise",
            Page::Careers => "careers",
            Page::Contact => "contact",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Some(Page::Home),
            "expertise" => Some(Page::Expertise),
            "careers" => Some(Page::Careers),
            "contact" => Some(Page::Contact),
            _ => None,
        }
    }

    /// The view that renders this page
    pub fn view(&self) -> View {
        match self {
            Page::Careers => View::Careers,
            Page::Home | Page::Expertise | Page::Contact => View::Home,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tabs on the careers page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CareerTab {
    #[default]
    OpenRoles,
    TechStack,
    Life,
    Graduate,
}

impl CareerTab {
    pub const ALL: [CareerTab; 4] = [
        CareerTab::OpenRoles,
        CareerTab::TechStack,
        CareerTab::Life,
        CareerTab::Graduate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CareerTab::OpenRoles => "open-roles",
            CareerTab::TechStack => "tech-stack",
            CareerTab::Life => "life",
            CareerTab::Graduate => "graduate",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.as_str() == s.trim())
    }
}

/// Current selection plus the callback that renders it
pub struct Navigator<K> {
    current: K,
    on_change: Box<dyn FnMut(K)>,
}

impl<K: Copy + PartialEq> Navigator<K> {
    pub fn new(initial: K, on_change: impl FnMut(K) + 'static) -> Self {
        Self {
            current: initial,
            on_change: Box::new(on_change),
        }
    }

    pub fn current(&self) -> K {
        self.current
    }

    /// Select `next`; the callback only fires when the selection changes.
    /// Returns whether it changed.
    pub fn set(&mut self, next: K) -> bool {
        if next == self.current {
            return false;
        }
        self.current = next;
        (self.on_change)(next);
        true
    }

    /// Re-run the callback for the current selection (initial render)
    pub fn refresh(&mut self) {
        (self.on_change)(self.current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn pages_share_home_view() {
        assert_eq!(Page::Home.view(), View::Home);
        assert_eq!(Page::Expertise.view(), View::Home);
        assert_eq!(Page::Contact.view(), View::Home);
        assert_eq!(Page::Careers.view(), View::Careers);
    }

    #[test]
    fn page_names_parse_back() {
        for page in [Page::Home, Page::Expertise, Page::Careers, Page::Contact] {
            assert_eq!(Page::parse(page.as_str()), Some(page));
        }
        assert_eq!(Page::parse(" Careers "), Some(Page::Careers));
        assert_eq!(Page::parse("blog"), None);
    }

    #[test]
    fn tab_names_parse_back() {
        for tab in CareerTab::ALL {
            assert_eq!(CareerTab::parse(tab.as_str()), Some(tab));
        }
        assert_eq!(CareerTab::parse("perks"), None);
        assert_eq!(CareerTab::default(), CareerTab::OpenRoles);
    }

    #[test]
    fn navigator_notifies_only_on_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let mut nav = Navigator::new(Page::Home, move |p| log.borrow_mut().push(p));

        assert!(!nav.set(Page::Home));
        assert!(nav.set(Page::Careers));
        assert!(!nav.set(Page::Careers));
        assert!(nav.set(Page::Expertise));

        assert_eq!(nav.current(), Page::Expertise);
        assert_eq!(*seen.borrow(), vec![Page::Careers, Page::Expertise]);
    }

    #[test]
    fn refresh_replays_current() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let mut nav = Navigator::new(CareerTab::Life, move |t| log.borrow_mut().push(t));
        nav.refresh();
        assert_eq!(*seen.borrow(), vec![CareerTab::Life]);
    }
}
