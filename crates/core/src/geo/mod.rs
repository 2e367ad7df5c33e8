//! Geography cascade
//!
//! Country → State → City option resolution. Each level is a [`Slice`] that
//! moves through `Idle → Loading → Loaded | Failed`. Selecting a parent resets
//! every level below it, and each fetch is issued with a [`FetchTicket`] so a
//! slow response for an older selection can never overwrite a newer one.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

use crate::phone;

mod slice;

pub use slice::{Slice, SliceStatus};

/// Country option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    /// Country name, as the geography service spells it
    pub name: String,

    /// ISO 3166-1 alpha-2 code, when the service provides one
    pub iso2: Option<String>,
}

/// State option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// State name
    pub name: String,

    /// Parent country name
    pub country: String,
}

/// City (LGA) option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    /// City name
    pub name: String,

    /// Parent state name
    pub state: String,
}

/// Anything selectable by name.
pub trait GeoOption {
    /// Option name
    fn name(&self) -> &str;
}

impl GeoOption for Country {
    fn name(&self) -> &str {
        &self.name
    }
}

impl GeoOption for State {
    fn name(&self) -> &str {
        &self.name
    }
}

impl GeoOption for City {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Cascade level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeoLevel {
    /// Country list
    Countries,

    /// States of the selected country
    States,

    /// Cities of the selected state
    Cities,
}

impl Display for GeoLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Countries => "countries",
            Self::States => "states",
            Self::Cities => "cities",
        })
    }
}

/// Identity of an issued fetch: the level, the slice generation it was issued
/// in and the selection that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    level: GeoLevel,
    generation: u64,
    country: Option<String>,
    state: Option<String>,
}

impl FetchTicket {
    /// Level this fetch loads.
    pub const fn level(&self) -> GeoLevel {
        self.level
    }

    /// Country selected when the fetch was issued.
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// State selected when the fetch was issued.
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }
}

/// A successful fetch result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeoPayload {
    /// Country list
    Countries(Vec<Country>),

    /// State list
    States(Vec<State>),

    /// City list
    Cities(Vec<City>),
}

impl GeoPayload {
    /// Level this payload belongs to.
    pub const fn level(&self) -> GeoLevel {
        match self {
            Self::Countries(_) => GeoLevel::Countries,
            Self::States(_) => GeoLevel::States,
            Self::Cities(_) => GeoLevel::Cities,
        }
    }
}

/// A failed fetch, carrying the message shown to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct GeoFetchError(pub String);

/// Outcome of applying a fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The result was written to its level.
    Applied,

    /// The selection moved on since the fetch was issued; the result was dropped.
    Stale,
}

/// Errors raised by selection changes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeoError {
    /// The level's options have not loaded yet.
    #[error("{0} are not loaded yet")]
    NotReady(GeoLevel),

    /// The parent level has no selection.
    #[error("select a parent before choosing from {0}")]
    MissingParent(GeoLevel),

    /// The name is not among the loaded options.
    #[error("`{name}` is not one of the available {level}")]
    UnknownOption {
        /// Level the selection was made on
        level: GeoLevel,

        /// Rejected name
        name: String,
    },
}

/// Operations shared by everything that owns a cascade, so fetch drivers can
/// work against either a bare [`GeoCascade`] or a form embedding one.
pub trait Cascade {
    /// Start (or restart) loading the country list.
    fn load_countries(&mut self) -> FetchTicket;

    /// Select a country and start loading its states.
    ///
    /// # Errors
    ///
    /// Returns a [`GeoError`] if the country list is not loaded or lacks `name`.
    fn select_country(&mut self, name: &str) -> Result<FetchTicket, GeoError>;

    /// Select a state and start loading its cities.
    ///
    /// # Errors
    ///
    /// Returns a [`GeoError`] if no country is selected, the state list is not
    /// loaded or lacks `name`.
    fn select_state(&mut self, name: &str) -> Result<FetchTicket, GeoError>;

    /// Select a city.
    ///
    /// # Errors
    ///
    /// Returns a [`GeoError`] if no state is selected, the city list is not
    /// loaded or lacks `name`.
    fn select_city(&mut self, name: &str) -> Result<(), GeoError>;

    /// Apply a fetch result if `ticket` still matches the current selection.
    fn apply(&mut self, ticket: &FetchTicket, result: Result<GeoPayload, GeoFetchError>)
    -> Applied;
}

/// The three-level geography cascade.
#[derive(Debug, Clone, Default)]
pub struct GeoCascade {
    countries: Slice<Country>,
    states: Slice<State>,
    cities: Slice<City>,
}

impl GeoCascade {
    /// Start with every level idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Country level.
    pub const fn countries(&self) -> &Slice<Country> {
        &self.countries
    }

    /// State level.
    pub const fn states(&self) -> &Slice<State> {
        &self.states
    }

    /// City level.
    pub const fn cities(&self) -> &Slice<City> {
        &self.cities
    }

    /// The selected country option.
    pub fn selected_country(&self) -> Option<&Country> {
        self.countries.selected_option()
    }

    /// ISO alpha-2 code of the selected country.
    pub fn selected_iso2(&self) -> Option<&str> {
        self.selected_country()
            .and_then(|country| country.iso2.as_deref())
    }

    /// ISO alpha-2 code of any loaded country, by name.
    pub fn iso2_of(&self, country: &str) -> Option<&str> {
        self.countries
            .find(country)
            .and_then(|country| country.iso2.as_deref())
    }

    /// Calling-code prefix for the selected country, e.g. `+234`; `None` when
    /// no country is selected or its ISO code has no known calling code.
    pub fn calling_code(&self) -> Option<String> {
        self.selected_iso2()
            .and_then(phone::calling_code)
            .map(|code| format!("+{code}"))
    }

    fn ticket(&self, level: GeoLevel, generation: u64) -> FetchTicket {
        FetchTicket {
            level,
            generation,
            country: self.countries.selected().map(str::to_string),
            state: match level {
                GeoLevel::Cities => self.states.selected().map(str::to_string),
                GeoLevel::Countries | GeoLevel::States => None,
            },
        }
    }

    fn is_current(&self, ticket: &FetchTicket) -> bool {
        match ticket.level {
            GeoLevel::Countries => ticket.generation == self.countries.generation(),
            GeoLevel::States => {
                ticket.generation == self.states.generation()
                    && ticket.country.as_deref() == self.countries.selected()
            }
            GeoLevel::Cities => {
                ticket.generation == self.cities.generation()
                    && ticket.country.as_deref() == self.countries.selected()
                    && ticket.state.as_deref() == self.states.selected()
            }
        }
    }
}

impl Cascade for GeoCascade {
    fn load_countries(&mut self) -> FetchTicket {
        self.states.reset();
        self.cities.reset();

        let generation = self.countries.begin();

        self.ticket(GeoLevel::Countries, generation)
    }

    fn select_country(&mut self, name: &str) -> Result<FetchTicket, GeoError> {
        self.countries.select(GeoLevel::Countries, name)?;

        // Any country change, re-selection included, drops both dependants
        // before the new state list arrives.
        self.cities.reset();

        let generation = self.states.begin();

        Ok(self.ticket(GeoLevel::States, generation))
    }

    fn select_state(&mut self, name: &str) -> Result<FetchTicket, GeoError> {
        if self.countries.selected().is_none() {
            return Err(GeoError::MissingParent(GeoLevel::States));
        }

        self.states.select(GeoLevel::States, name)?;

        let generation = self.cities.begin();

        Ok(self.ticket(GeoLevel::Cities, generation))
    }

    fn select_city(&mut self, name: &str) -> Result<(), GeoError> {
        if self.countries.selected().is_none() || self.states.selected().is_none() {
            return Err(GeoError::MissingParent(GeoLevel::Cities));
        }

        self.cities.select(GeoLevel::Cities, name)
    }

    fn apply(
        &mut self,
        ticket: &FetchTicket,
        result: Result<GeoPayload, GeoFetchError>,
    ) -> Applied {
        if !self.is_current(ticket) {
            return Applied::Stale;
        }

        match (ticket.level, result) {
            (GeoLevel::Countries, Ok(GeoPayload::Countries(options))) => {
                self.countries.resolve(options);
            }
            (GeoLevel::States, Ok(GeoPayload::States(options))) => self.states.resolve(options),
            (GeoLevel::Cities, Ok(GeoPayload::Cities(options))) => self.cities.resolve(options),
            (GeoLevel::Countries, Err(error)) => self.countries.fail(error.0),
            (GeoLevel::States, Err(error)) => self.states.fail(error.0),
            (GeoLevel::Cities, Err(error)) => self.cities.fail(error.0),
            (_, Ok(_)) => return Applied::Stale,
        }

        Applied::Applied
    }
}
