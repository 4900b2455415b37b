//! Fixed lookup tables the transform draws movie metadata from.

use crate::movie::Genre;

pub struct MovieInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub genre: Genre,
}

pub struct ReviewTemplate {
    pub author: &'static str,
    pub content: &'static str,
}

pub const YEARS: [u16; 5] = [2020, 2021, 2022, 2023, 2024];

pub const RATINGS: [f32; 10] = [6.5, 7.0, 7.5, 8.0, 8.5, 9.0, 7.8, 8.2, 7.3, 8.7];

pub const MOVIE_DATA: [MovieInfo; 20] = [
    MovieInfo {
        title: "The Dark Horizon",
        description: "A former spy must come out of retirement when a mysterious organization threatens global security. Racing against time, he uncovers a conspiracy that goes deeper than anyone imagined.",
        genre: Genre::Action,
    },
    MovieInfo {
        title: "Laugh Out Loud",
        description: "When three college friends reunite for a wedding, their hilarious misadventures and old rivalries lead to unexpected chaos and heartwarming moments.",
        genre: Genre::Comedy,
    },
    MovieInfo {
        title: "Broken Dreams",
        description: "A struggling musician faces the challenges of fame, love, and self-discovery in this emotional journey through the music industry.",
        genre: Genre::Drama,
    },
    MovieInfo {
        title: "Galaxy Runners",
        description: "In the year 3025, a ragtag crew of space smugglers stumble upon an ancient alien artifact that could change the fate of the universe.",
        genre: Genre::SciFi,
    },
    MovieInfo {
        title: "The Haunting Hour",
        description: "A family moves into their dream home, only to discover that the previous owners never truly left. Some doors should never be opened.",
        genre: Genre::Horror,
    },
    MovieInfo {
        title: "Love in Paris",
        description: "Two strangers meet by chance in the city of lights. As they explore Paris together, they discover that sometimes love finds you when you least expect it.",
        genre: Genre::Romance,
    },
    MovieInfo {
        title: "Silent Witness",
        description: "A journalist investigating a cold case becomes the target of a powerful criminal organization. The truth could cost her everything.",
        genre: Genre::Thriller,
    },
    MovieInfo {
        title: "Magic Kingdom",
        description: "A young girl discovers she has magical powers and must save her enchanted world from an ancient evil in this animated adventure.",
        genre: Genre::Animation,
    },
    MovieInfo {
        title: "Steel Thunder",
        description: "Elite soldiers embark on a dangerous mission behind enemy lines. Loyalty and courage are tested in this explosive military action film.",
        genre: Genre::Action,
    },
    MovieInfo {
        title: "Wedding Chaos",
        description: "A wedding planner's perfectly organized event spirals into hilarious disaster when the bride's and groom's eccentric families collide.",
        genre: Genre::Comedy,
    },
    MovieInfo {
        title: "The Last Letter",
        description: "After finding old love letters in her grandmother's attic, a woman uncovers a secret that changes her understanding of family and sacrifice.",
        genre: Genre::Drama,
    },
    MovieInfo {
        title: "Neon City 2099",
        description: "In a cyberpunk future, a hacker and an android team up to take down a corrupt mega-corporation controlling humanity's minds.",
        genre: Genre::SciFi,
    },
    MovieInfo {
        title: "Midnight Screams",
        description: "College students spending the weekend at a remote cabin discover an ancient book that unleashes unspeakable horrors.",
        genre: Genre::Horror,
    },
    MovieInfo {
        title: "Summer Hearts",
        description: "A cynical travel writer and a free-spirited photographer find unexpected romance during a Mediterranean cruise.",
        genre: Genre::Romance,
    },
    MovieInfo {
        title: "The Conspiracy",
        description: "A detective uncovers a web of lies and corruption reaching the highest levels of government. Trust no one.",
        genre: Genre::Thriller,
    },
    MovieInfo {
        title: "Dragon Quest",
        description: "A brave young hero and his magical companions embark on an epic quest to save the kingdom from an evil sorcerer.",
        genre: Genre::Animation,
    },
    MovieInfo {
        title: "Fury Road",
        description: "A fearless driver seeks revenge against the gang that destroyed his family in this high-octane chase across the desert.",
        genre: Genre::Action,
    },
    MovieInfo {
        title: "Office Mayhem",
        description: "When a strict new boss takes over, the employees band together for hilarious schemes to make work bearable again.",
        genre: Genre::Comedy,
    },
    MovieInfo {
        title: "Forgotten Voices",
        description: "A therapist working with trauma patients begins to question reality when their stories start coming true.",
        genre: Genre::Drama,
    },
    MovieInfo {
        title: "Star Voyager",
        description: "Humanity's first interstellar mission discovers a planet with intelligent life, but first contact doesn't go as planned.",
        genre: Genre::SciFi,
    },
];

pub const REVIEW_TEMPLATES: [ReviewTemplate; 10] = [
    ReviewTemplate {
        author: "Michael Johnson",
        content: "Absolutely loved this movie! The storytelling was incredible and the performances were outstanding. A must-watch for everyone.",
    },
    ReviewTemplate {
        author: "Sarah Williams",
        content: "Great cinematography and a compelling plot. The director really outdid themselves with this one. Highly recommended!",
    },
    ReviewTemplate {
        author: "David Chen",
        content: "One of the best films I've seen this year. The character development was superb and the ending left me speechless.",
    },
    ReviewTemplate {
        author: "Emily Parker",
        content: "A thrilling ride from start to finish. The action sequences were breathtaking and the soundtrack was perfect.",
    },
    ReviewTemplate {
        author: "James Wilson",
        content: "Beautiful storytelling with amazing visual effects. This movie sets a new standard for the genre.",
    },
    ReviewTemplate {
        author: "Amanda Ross",
        content: "I was on the edge of my seat the entire time. The plot twists were unexpected and brilliantly executed.",
    },
    ReviewTemplate {
        author: "Robert Taylor",
        content: "Fantastic performances by the entire cast. The emotional depth of this film really resonated with me.",
    },
    ReviewTemplate {
        author: "Lisa Anderson",
        content: "A masterpiece of modern cinema. Every scene was crafted with care and attention to detail.",
    },
    ReviewTemplate {
        author: "Chris Martinez",
        content: "Entertaining from beginning to end. Perfect blend of action, humor, and heart.",
    },
    ReviewTemplate {
        author: "Jennifer Brown",
        content: "This movie exceeded all my expectations. The story was engaging and the visuals were stunning.",
    },
];
