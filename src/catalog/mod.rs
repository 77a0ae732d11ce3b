//! Static reference catalogs the generator draws from.
//!
//! Artists, venues, event-type phrases, and marketplace text templates are
//! treated as immutable input data. Nothing in here is randomized; stages
//! sample from these slices through their own RNG.

/// Popularity tier of an artist, used to scale asking prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Legend,
    Superstar,
    Hot,
    Rising,
    Veteran,
}

impl Tier {
    pub fn price_multiplier(self) -> f64 {
        match self {
            Tier::Legend => 1.5,
            Tier::Superstar => 1.3,
            Tier::Hot => 1.1,
            Tier::Rising => 0.9,
            Tier::Veteran => 1.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenueKind {
    Arena,
    Stadium,
    Indoor,
    Theater,
    Club,
    Cafe,
    Mall,
    Outdoor,
}

impl VenueKind {
    pub fn price_multiplier(self) -> f64 {
        match self {
            VenueKind::Arena => 1.2,
            VenueKind::Stadium => 1.3,
            VenueKind::Indoor => 1.0,
            VenueKind::Theater => 0.9,
            VenueKind::Club => 0.8,
            VenueKind::Cafe => 0.6,
            VenueKind::Mall => 0.7,
            VenueKind::Outdoor => 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Artist {
    pub name: &'static str,
    pub genre: &'static str,
    pub tier: Tier,
}

#[derive(Debug, Clone, Copy)]
pub struct Venue {
    pub name: &'static str,
    pub city: &'static str,
    pub capacity: u32,
    pub kind: VenueKind,
}

pub const ARTISTS: &[Artist] = &[
    Artist { name: "Midnight Parade", genre: "rock", tier: Tier::Legend },
    Artist { name: "Serena Kwok", genre: "pop", tier: Tier::Legend },
    Artist { name: "Elliot Vance", genre: "pop", tier: Tier::Legend },
    Artist { name: "Neon Harbor", genre: "indie_rock", tier: Tier::Superstar },
    Artist { name: "June Weather", genre: "pop", tier: Tier::Superstar },
    Artist { name: "Caroline Mars", genre: "indie_pop", tier: Tier::Superstar },
    Artist { name: "Glasshouse Radio", genre: "indie_rock", tier: Tier::Superstar },
    Artist { name: "Felix Tan", genre: "pop", tier: Tier::Superstar },
    Artist { name: "Copper Sparrow", genre: "indie_folk", tier: Tier::Hot },
    Artist { name: "Night Market Heroes", genre: "indie_rock", tier: Tier::Hot },
    Artist { name: "Violet Underpass", genre: "electronic", tier: Tier::Hot },
    Artist { name: "The Harbor Lights", genre: "indie_rock", tier: Tier::Hot },
    Artist { name: "Daphne Liu", genre: "pop", tier: Tier::Hot },
    Artist { name: "Static Bloom", genre: "rock", tier: Tier::Hot },
    Artist { name: "Paper Lantern Club", genre: "indie_pop", tier: Tier::Hot },
    Artist { name: "Mono Polaroid", genre: "electronic", tier: Tier::Hot },
    Artist { name: "Cloud Atlas Kid", genre: "hip_hop", tier: Tier::Rising },
    Artist { name: "Inkwell", genre: "indie_pop", tier: Tier::Rising },
    Artist { name: "Sophie Ren", genre: "pop", tier: Tier::Rising },
    Artist { name: "Two Stray Cats", genre: "indie_rock", tier: Tier::Rising },
    Artist { name: "Echo Terrace", genre: "electronic", tier: Tier::Rising },
    Artist { name: "Bitter Orange", genre: "indie_folk", tier: Tier::Rising },
    Artist { name: "Lemon Motel", genre: "indie_pop", tier: Tier::Rising },
    Artist { name: "Haze & Howl", genre: "hip_hop", tier: Tier::Rising },
    Artist { name: "Stonebridge Union", genre: "rock", tier: Tier::Veteran },
    Artist { name: "Marcus Ling", genre: "pop", tier: Tier::Veteran },
    Artist { name: "The Old Post Road", genre: "indie_folk", tier: Tier::Veteran },
    Artist { name: "Grace Fontaine", genre: "pop", tier: Tier::Veteran },
    Artist { name: "Silverline", genre: "rock", tier: Tier::Veteran },
    Artist { name: "Harbor & Pine", genre: "indie_folk", tier: Tier::Veteran },
    Artist { name: "Ruby Chen", genre: "pop", tier: Tier::Veteran },
    Artist { name: "The Seventh Street Band", genre: "rock", tier: Tier::Veteran },
];

pub const VENUES: &[Venue] = &[
    Venue { name: "Metro Dome Arena", city: "Northgate", capacity: 15000, kind: VenueKind::Arena },
    Venue { name: "Harborside Dome", city: "Port Ellis", capacity: 12000, kind: VenueKind::Arena },
    Venue { name: "Riverside Stadium", city: "Midvale", capacity: 20000, kind: VenueKind::Stadium },
    Venue { name: "Grand Concert Hall", city: "Northgate", capacity: 5000, kind: VenueKind::Indoor },
    Venue { name: "University Pavilion", city: "Northgate", capacity: 6000, kind: VenueKind::Indoor },
    Venue { name: "Memorial Auditorium", city: "Westbrook", capacity: 4000, kind: VenueKind::Indoor },
    Venue { name: "City Hall Theater", city: "Northgate", capacity: 2500, kind: VenueKind::Theater },
    Venue { name: "Civic Center Theater", city: "Eastgate", capacity: 1800, kind: VenueKind::Theater },
    Venue { name: "The Velvet Room", city: "Northgate", capacity: 1200, kind: VenueKind::Club },
    Venue { name: "Warehouse 9", city: "Port Ellis", capacity: 1500, kind: VenueKind::Club },
    Venue { name: "The Basement", city: "Northgate", capacity: 350, kind: VenueKind::Club },
    Venue { name: "Riverbank Live House", city: "Midvale", capacity: 1000, kind: VenueKind::Club },
    Venue { name: "Blackbird Cafe", city: "Northgate", capacity: 300, kind: VenueKind::Cafe },
    Venue { name: "Corner Stage Cafe", city: "Westbrook", capacity: 200, kind: VenueKind::Cafe },
    Venue { name: "Eastgate Galleria Stage", city: "Eastgate", capacity: 800, kind: VenueKind::Mall },
    Venue { name: "Harbor Mall Atrium", city: "Port Ellis", capacity: 1200, kind: VenueKind::Mall },
    Venue { name: "Lakeside Park Stage", city: "Midvale", capacity: 5000, kind: VenueKind::Outdoor },
    Venue { name: "Old Mill Fairgrounds", city: "Westbrook", capacity: 3000, kind: VenueKind::Outdoor },
    Venue { name: "Seaside Amphitheater", city: "Port Ellis", capacity: 4000, kind: VenueKind::Outdoor },
    Venue { name: "Founders Square", city: "Northgate", capacity: 2000, kind: VenueKind::Outdoor },
];

/// Phrases appended to an artist name to form an event name.
pub const EVENT_TYPES: &[&str] = &[
    "Live Tour",
    "World Tour",
    "Concert",
    "Album Tour",
    "Anniversary Show",
    "Reunion Concert",
    "Music Festival",
    "Acoustic Night",
];

/// Full seat-area vocabulary, used for the `{area}` slot in listing text.
pub const SEAT_AREAS: &[&str] = &[
    "Zone A",
    "Zone B",
    "Zone C",
    "VIP",
    "General",
    "Front Floor",
    "Rear Floor",
    "Center",
];

const LARGE_VENUE_AREAS: &[&str] = &["Zone A", "Zone B", "Zone C", "VIP"];
const MEDIUM_VENUE_AREAS: &[&str] = &["Zone A", "Zone B", "Zone C"];
const SMALL_VENUE_AREAS: &[&str] = &["Zone A", "Zone B", "General"];

/// Seat areas a venue actually sells, by capacity tier.
pub fn seat_areas(venue: &Venue) -> &'static [&'static str] {
    if venue.capacity > 10_000 {
        LARGE_VENUE_AREAS
    } else if venue.capacity > 5_000 {
        MEDIUM_VENUE_AREAS
    } else {
        SMALL_VENUE_AREAS
    }
}

/// Event description templates. Slots: `{artist}`, `{city}`.
pub const DESCRIPTION_TEMPLATES: &[&str] = &[
    "Catch {artist} live before tickets run out!",
    "{artist} brings the full album setlist to {city}.",
    "{artist} returns to {city} for one night only.",
    "The {city} stop of the {artist} tour.",
    "An evening of classics with {artist}.",
];

/// Listing content templates. Slots: `{event}`, `{area}`, `{price}`.
pub const SELL_TEMPLATES: &[&str] = &[
    "Selling my {event} tickets, fair price!",
    "Great seats for {event}, open to offers",
    "Can't make it anymore, letting my {event} tickets go",
    "{event} tickets in {area}, face value",
    "Good spot for {event}, asking {price}",
    "Quick sale on {event} tickets, message me",
];

pub const EXCHANGE_TEMPLATES: &[&str] = &[
    "Have {event} tickets, hoping to swap for another date",
    "Trading my {event} seats for a different show",
    "{event} swap wanted: looking for a better slot",
    "{event} tickets here, would trade for {area} or nearby",
    "Swapping {event}, after my dream seats",
];

pub const BUY_TEMPLATES: &[&str] = &[
    "Looking for {event} tickets, price negotiable",
    "Want to see {event}, get in touch",
    "Missed the {event} drop, hoping someone can help",
    "Will take {event} tickets in any area",
    "Searching for {event} tickets, serious buyer",
];
