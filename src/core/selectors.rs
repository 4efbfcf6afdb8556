//! Selector and class-name constants
//!
//! Centralized registry for every selector the browser layer queries and
//! every class the components toggle.

/// Navigation
pub mod nav {
    pub const NAVBAR: &str = ".navbar";
    pub const MENU_TOGGLE: &str = ".menu-toggle";
    pub const PANEL: &str = ".nav-links";
    pub const LINKS: &str = ".nav-link";
    pub const SECTIONS: &str = "section";
    pub const ANCHORS: &str = "a[href^=\"#\"]";
}

/// Theme switcher
pub mod theme {
    pub const TOGGLE: &str = ".theme-toggle";
    pub const PREFERS_LIGHT: &str = "(prefers-color-scheme: light)";
}

/// Hero, typing output, decorative effects
pub mod hero {
    pub const HERO: &str = ".hero";
    pub const CONTENT: &str = ".hero-content";
    pub const TYPED_OUTPUT: &str = ".typed-output";
    pub const FLOATING_CARDS: &str = ".floating-card";
    pub const ORBS: &str = ".gradient-orb";
}

/// Scroll reveal targets
pub mod reveal {
    pub const SKILL_CATEGORY: &str = ".skill-category";
    pub const PROJECT_CARD: &str = ".project-card";
    pub const STAT_CARD: &str = ".stat-card";
    pub const CONTACT_METHOD: &str = ".contact-method";
    pub const SKILL_BAR: &str = ".skill-progress";
    pub const STAT_NUMBER: &str = ".stat-number";

    pub const ALL: &[&str] = &[SKILL_CATEGORY, PROJECT_CARD, STAT_CARD, CONTACT_METHOD];
}

/// Projects carousel
pub mod carousel {
    pub const TRACK: &str = ".projects-track";
    pub const CARDS: &str = ".projects-track .project-card";
    pub const PREV: &str = ".carousel-prev";
    pub const NEXT: &str = ".carousel-next";
    pub const DOTS: &str = ".carousel-dots";
}

/// Contact form
pub mod contact {
    pub const FORM: &str = ".contact-form";
    pub const SUBMIT: &str = ".submit-btn";
    pub const FIELDS: &str = "input, textarea, select";
}

/// Class names toggled by components
pub mod class {
    pub const ACTIVE: &str = "active";
    pub const SCROLLED: &str = "scrolled";
    pub const FADE_IN: &str = "fade-in";
    pub const LIGHT_THEME: &str = "light-theme";
    pub const ANIMATING: &str = "animating";
    pub const DOT: &str = "carousel-dot";
}

/// Attributes read or written by components
pub mod attr {
    pub const HREF: &str = "href";
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const PROGRESS: &str = "data-progress";
    pub const TARGET: &str = "data-target";
    pub const THEME: &str = "data-theme";
    pub const ARIA_LABEL: &str = "aria-label";
}
