//! Static copy of the site.

use crate::site::SlideOutline;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stat {
    /// Raw `data-target` value.
    pub target: &'static str,
    pub suffix: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Block {
    Lead(&'static str),
    Paragraph(&'static str),
    Bullets(&'static [&'static str]),
    Stats(&'static [Stat]),
    /// Call to action that advances the carousel.
    NextButton(&'static str),
    ContactForm,
    Scheduling,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideContent {
    pub id: &'static str,
    pub nav_label: &'static str,
    pub heading: Option<&'static str>,
    pub blocks: &'static [Block],
}

impl SlideContent {
    /// The heading, when present, is the first element of the reveal
    /// cascade; every block follows in order.
    pub fn outline(&self) -> SlideOutline {
        let counters = self
            .blocks
            .iter()
            .filter_map(|block| match block {
                Block::Stats(stats) => Some(stats.iter().map(|s| s.target.to_string())),
                _ => None,
            })
            .flatten()
            .collect();
        SlideOutline {
            heading: self.heading.map(str::to_string),
            animated: usize::from(self.heading.is_some()) + self.blocks.len(),
            counters,
        }
    }
}

/// Section revealed once when scrolled into view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Highlight {
    pub key: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

pub const SLIDES: &[SlideContent] = &[
    SlideContent {
        id: "hero",
        nav_label: "Home",
        heading: Some("AI Strategy That Delivers"),
        blocks: &[
            Block::Lead(
                "Sage Consulting helps mid-sized companies turn artificial intelligence \
                 from a buzzword into measurable business results.",
            ),
            Block::Paragraph("Practical roadmaps. Hands-on implementation. No hype."),
            Block::NextButton("See Why It Matters"),
        ],
    },
    SlideContent {
        id: "gap",
        nav_label: "The Gap",
        heading: Some("The AI Adoption Gap"),
        blocks: &[
            Block::Paragraph(
                "Most leadership teams agree AI matters. Far fewer have a plan to use it.",
            ),
            Block::Stats(&[
                Stat {
                    target: "87",
                    suffix: "%",
                    label: "of executives call AI a strategic priority",
                },
                Stat {
                    target: "3.7",
                    suffix: "x",
                    label: "average return on successful AI projects",
                },
                Stat {
                    target: "42",
                    suffix: "%",
                    label: "of companies have moved past the pilot stage",
                },
            ]),
            Block::NextButton("How We Help"),
        ],
    },
    SlideContent {
        id: "services",
        nav_label: "Services",
        heading: Some("What We Do"),
        blocks: &[
            Block::Bullets(&[
                "AI readiness assessments and opportunity mapping",
                "Strategy roadmaps tied to revenue and cost targets",
                "Vendor selection and proof-of-concept delivery",
                "Team training and change management",
            ]),
            Block::NextButton("See Our Results"),
        ],
    },
    SlideContent {
        id: "results",
        nav_label: "Results",
        heading: Some("Proven Results"),
        blocks: &[
            Block::Stats(&[
                Stat {
                    target: "150",
                    suffix: "+",
                    label: "projects delivered",
                },
                Stat {
                    target: "98",
                    suffix: "%",
                    label: "client satisfaction",
                },
                Stat {
                    target: "2.5",
                    suffix: "M",
                    label: "average annual savings per client",
                },
            ]),
            Block::NextButton("Talk To Us"),
        ],
    },
    SlideContent {
        id: "contact",
        nav_label: "Contact",
        heading: Some("Let's Talk"),
        blocks: &[
            Block::Paragraph("Tell us where you are, and we will show you where AI can take you."),
            Block::ContactForm,
            Block::Scheduling,
        ],
    },
];

pub const HIGHLIGHTS: &[Highlight] = &[
    Highlight {
        key: "approach",
        title: "Our Approach",
        body: "We start with your business goals, not the technology.",
    },
    Highlight {
        key: "partnership",
        title: "Long-Term Partnership",
        body: "We stay after launch to measure, tune and scale what works.",
    },
];

pub fn outlines() -> Vec<SlideOutline> {
    SLIDES.iter().map(SlideContent::outline).collect()
}

pub fn reveal_keys() -> impl Iterator<Item = String> {
    HIGHLIGHTS.iter().map(|h| h.key.to_string())
}
