/// Mobile navigation menu.
///
/// The state lives in the `active` class on `#hamburger` and `#nav-menu`; `MenuState` is
/// derived from and written back to those classes rather than kept on the side.
use crate::target::RenderTarget;

pub const HAMBURGER: &str = "#hamburger";
pub const NAV_MENU: &str = "#nav-menu";
const OPEN_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    HamburgerClick,
    NavLinkClick,
    Escape,
}

impl MenuState {
    pub fn transition(self, event: MenuEvent) -> Self {
        match (self, event) {
            (Self::Closed, MenuEvent::HamburgerClick) => Self::Open,
            (Self::Open, MenuEvent::HamburgerClick) => Self::Closed,
            (_, MenuEvent::NavLinkClick | MenuEvent::Escape) => Self::Closed,
        }
    }

    pub fn read<T: RenderTarget + ?Sized>(target: &T) -> Self {
        if target.has_class(NAV_MENU, OPEN_CLASS) {
            Self::Open
        } else {
            Self::Closed
        }
    }

    pub fn write<T: RenderTarget + ?Sized>(self, target: &mut T) {
        let open = self == Self::Open;
        target.set_class(HAMBURGER, OPEN_CLASS, open);
        target.set_class(NAV_MENU, OPEN_CLASS, open);
    }
}

/// Apply `event` to the menu in `target`. Hamburger and nav-link clicks need both elements
/// present; escape closes whatever is there.
pub fn handle<T: RenderTarget + ?Sized>(target: &mut T, event: MenuEvent) -> MenuState {
    let wired = target.query(HAMBURGER) && target.query(NAV_MENU);
    let current = MenuState::read(target);
    if event != MenuEvent::Escape && !wired {
        return current;
    }
    let next = current.transition(event);
    next.write(target);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::MemoryDocument;

    #[test]
    fn transitions() {
        use MenuEvent::*;
        use MenuState::*;
        assert_eq!(Closed.transition(HamburgerClick), Open);
        assert_eq!(Open.transition(HamburgerClick), Closed);
        for state in [Open, Closed] {
            assert_eq!(state.transition(NavLinkClick), Closed);
            assert_eq!(state.transition(Escape), Closed);
        }
    }

    #[test]
    fn stays_open_until_link_or_escape() {
        let mut doc = MemoryDocument::with_elements([HAMBURGER, NAV_MENU]);
        assert_eq!(MenuState::read(&doc), MenuState::Closed);
        assert_eq!(handle(&mut doc, MenuEvent::HamburgerClick), MenuState::Open);
        assert!(doc.has_class(HAMBURGER, "active"));
        assert!(doc.has_class(NAV_MENU, "active"));
        assert_eq!(MenuState::read(&doc), MenuState::Open);

        assert_eq!(handle(&mut doc, MenuEvent::NavLinkClick), MenuState::Closed);
        assert!(!doc.has_class(NAV_MENU, "active"));

        handle(&mut doc, MenuEvent::HamburgerClick);
        assert_eq!(handle(&mut doc, MenuEvent::Escape), MenuState::Closed);
        assert_eq!(handle(&mut doc, MenuEvent::Escape), MenuState::Closed);
    }

    #[test]
    fn missing_elements_are_skipped() {
        let mut doc = MemoryDocument::with_elements([NAV_MENU]);
        assert_eq!(handle(&mut doc, MenuEvent::HamburgerClick), MenuState::Closed);
        assert!(!doc.has_class(NAV_MENU, "active"));
    }
}
