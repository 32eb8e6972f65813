use crate::sink::DashboardSink;

/// The fixed set of dashboard sections; exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    Markets,
    Crypto,
    News,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Home => "Accueil",
            Section::Markets => "Marchés",
            Section::Crypto => "Crypto",
            Section::News => "Actualités",
        }
    }
}

/// Two-state-per-link navigation: activating a section hides the rest and
/// shows that one. Not a router — no history, no deep-linking.
pub struct NavigationController {
    active: Section,
}

impl NavigationController {
    pub fn new() -> Self {
        Self {
            active: Section::Home,
        }
    }

    pub fn active(&self) -> Section {
        self.active
    }

    /// Activates `section` on the sink. Returns `true` when the caller must
    /// run a news cycle, which happens only on entering the news section.
    pub fn activate(&mut self, section: Section, sink: &mut dyn DashboardSink) -> bool {
        self.active = section;
        sink.show_section(section);
        section == Section::News
    }
}
