//! View models for a gallery front end.
//!
//! Everything here is a pure function of [`PageState`]; no network access and
//! no state of its own. Each view implements `Display` for plain-text output.

use std::fmt;

use crate::controller::{PageList, PageState, Phase};
use crate::types::Pokemon;

/// Navigation header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub has_previous: bool,
    pub has_next: bool,
    pub loading: bool,
    pub drawer_open: bool,
}

impl HeaderView {
    pub fn from_state(state: &PageState) -> Self {
        Self {
            has_previous: state.previous_cursor().is_some(),
            has_next: state.next_cursor().is_some(),
            loading: state.loading(),
            drawer_open: state.drawer_open(),
        }
    }

    /// Navigation is disabled while a page is loading.
    pub fn can_go_previous(&self) -> bool {
        self.has_previous && !self.loading
    }

    pub fn can_go_next(&self) -> bool {
        self.has_next && !self.loading
    }
}

/// One gallery card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: u32,
    pub name: String,
    pub image: Option<String>,
}

impl Card {
    pub fn from_pokemon(pokemon: &Pokemon) -> Self {
        Self {
            id: pokemon.id,
            name: pokemon.name.clone(),
            image: pokemon.card_image().map(str::to_string),
        }
    }
}

/// One card per loaded record; failed slots are skipped.
pub fn render_cards(page: &PageList) -> Vec<Card> {
    page.loaded().map(Card::from_pokemon).collect()
}

/// The detail drawer for the selected record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerView {
    pub id: u32,
    pub name: String,
    pub image: Option<String>,
    pub height: Option<u32>,
    pub weight: Option<u32>,
    pub base_experience: Option<u32>,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub stats: Vec<(String, u32)>,
}

impl DrawerView {
    pub fn from_selection(selection: Option<&Pokemon>) -> Option<Self> {
        let p = selection?;
        Some(Self {
            id: p.id,
            name: p.name.clone(),
            image: p.artwork().map(str::to_string),
            height: p.height,
            weight: p.weight,
            base_experience: p.base_experience,
            types: p.type_names().into_iter().map(str::to_string).collect(),
            abilities: p
                .abilities
                .iter()
                .map(|a| {
                    if a.is_hidden {
                        format!("{} (hidden)", a.ability.name)
                    } else {
                        a.ability.name.clone()
                    }
                })
                .collect(),
            stats: p
                .stats
                .iter()
                .map(|s| (s.stat.name.clone(), s.base_stat))
                .collect(),
        })
    }
}

/// What the gallery body should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Broken,
    Loading,
    /// A request failed before any page was loaded.
    Failed { message: String },
    Gallery {
        cards: Vec<Card>,
        /// Present only while the drawer is open and something is selected.
        drawer: Option<DrawerView>,
        /// Banner for a failed request; the previous page stays visible.
        error: Option<String>,
    },
}

/// Map the gallery state to the screen a front end should draw.
pub fn render(state: &PageState) -> Screen {
    let error = match state.phase() {
        Phase::Broken => return Screen::Broken,
        Phase::Loading => return Screen::Loading,
        Phase::Failed(e) if state.page_list().is_empty() => {
            return Screen::Failed {
                message: e.to_string(),
            };
        }
        Phase::Failed(e) => Some(e.to_string()),
        Phase::Idle | Phase::Ready => None,
    };

    Screen::Gallery {
        cards: render_cards(state.page_list()),
        drawer: if state.drawer_open() {
            DrawerView::from_selection(state.selection())
        } else {
            None
        },
        error,
    }
}

impl fmt::Display for HeaderView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prev = if self.can_go_previous() { "[p]rev" } else { "-" };
        let next = if self.can_go_next() { "[n]ext" } else { "-" };
        write!(f, "Pokedex  {}  {}", prev, next)?;
        if self.loading {
            write!(f, "  (loading)")?;
        }
        Ok(())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:<5} {}", self.id, self.name)?;
        if let Some(image) = &self.image {
            write!(f, "  <{}>", image)?;
        }
        Ok(())
    }
}

impl fmt::Display for DrawerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (#{})", self.name, self.id)?;
        if let Some(image) = &self.image {
            writeln!(f, "  image: {}", image)?;
        }
        if let Some(height) = self.height {
            writeln!(f, "  height: {}", height)?;
        }
        if let Some(weight) = self.weight {
            writeln!(f, "  weight: {}", weight)?;
        }
        if let Some(xp) = self.base_experience {
            writeln!(f, "  base experience: {}", xp)?;
        }
        if !self.types.is_empty() {
            writeln!(f, "  types: {}", self.types.join(", "))?;
        }
        if !self.abilities.is_empty() {
            writeln!(f, "  abilities: {}", self.abilities.join(", "))?;
        }
        for (name, value) in &self.stats {
            writeln!(f, "  {:<16} {}", name, value)?;
        }
        Ok(())
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Broken => writeln!(f, "Something is broken. The gallery could not be loaded."),
            Screen::Loading => writeln!(f, "Loading..."),
            Screen::Failed { message } => writeln!(f, "Request failed: {}", message),
            Screen::Gallery {
                cards,
                drawer,
                error,
            } => {
                if let Some(message) = error {
                    writeln!(f, "Request failed: {}", message)?;
                }
                for card in cards {
                    writeln!(f, "{}", card)?;
                }
                if let Some(drawer) = drawer {
                    writeln!(f)?;
                    write!(f, "{}", drawer)?;
                }
                Ok(())
            }
        }
    }
}
