/// Display metadata for a known skill dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionMeta {
    pub key: &'static str,
    pub name: &'static str,
    pub group: &'static str,
    pub advantage_tip: &'static str,
    pub improvement_tip: &'static str,
}

pub const GROUNDSTROKES: &str = "Groundstrokes";
pub const SERVE_AND_RETURN: &str = "Serve & return";
pub const NET_AND_MOVEMENT: &str = "Net & movement";
pub const MATCH_PLAY: &str = "Match play";

/// Display groups in presentation order.
pub const GROUPS: [&str; 4] = [GROUNDSTROKES, SERVE_AND_RETURN, NET_AND_MOVEMENT, MATCH_PLAY];

const GENERIC_ADVANTAGE_TIP: &str = "This is one of your strengths; lean on it in matches.";
const GENERIC_IMPROVEMENT_TIP: &str =
    "Set aside focused practice for this area and work on it deliberately.";

/// Canonical dimension order. Summaries and breakdowns always follow this order.
pub const DIMENSIONS: [DimensionMeta; 10] = [
    DimensionMeta {
        key: "baseline",
        name: "Baseline (consistency + depth)",
        group: GROUNDSTROKES,
        advantage_tip: "Use baseline rallies as your main source of points: control the tempo with depth and changes of direction.",
        improvement_tip: "Drill depth and placement on purpose, e.g. crosscourt deep rallies with a down-the-line change, so your baseline ball is both safe and threatening.",
    },
    DimensionMeta {
        key: "forehand",
        name: "Forehand",
        group: GROUNDSTROKES,
        advantage_tip: "Look for your forehand to attack in matches; it is the shot you can build points around.",
        improvement_tip: "Work on a complete swing path and contact timing to make the forehand steadier before adding pace.",
    },
    DimensionMeta {
        key: "backhand",
        name: "Backhand",
        group: GROUNDSTROKES,
        advantage_tip: "Your backhand holds up well; use it to change direction and push opponents deep.",
        improvement_tip: "Build the backhand up from a reliable slice, then move on to a topspin drive once the slice is steady.",
    },
    DimensionMeta {
        key: "serve",
        name: "Serve",
        group: SERVE_AND_RETURN,
        advantage_tip: "Your serve creates pressure; practise the serve plus first-ball pattern to cash in on it.",
        improvement_tip: "Separate first and second serves: secure a spin second serve first, then add pace and placement to the first.",
    },
    DimensionMeta {
        key: "return",
        name: "Return of serve",
        group: SERVE_AND_RETURN,
        advantage_tip: "Your return is solid; step in on second serves and turn defence into attack.",
        improvement_tip: "Practise returning different serve types with a compact swing, especially against pace.",
    },
    DimensionMeta {
        key: "net",
        name: "Net play & overhead",
        group: NET_AND_MOVEMENT,
        advantage_tip: "You are comfortable at the net; create more chances to come forward and finish points there.",
        improvement_tip: "Train low volleys, backhand volleys and volley sequences so your net game becomes complete.",
    },
    DimensionMeta {
        key: "footwork",
        name: "Footwork & court coverage",
        group: NET_AND_MOVEMENT,
        advantage_tip: "Your movement is a weapon; move opponents around boldly knowing you can recover.",
        improvement_tip: "Add side-to-side drills mixed with short balls and lobs so you stay balanced under varied patterns.",
    },
    DimensionMeta {
        key: "tactics",
        name: "Tactics & mental game",
        group: MATCH_PLAY,
        advantage_tip: "Keep reading opponents' weaknesses and plan points around them; it is already paying off.",
        improvement_tip: "Learn a few basic patterns of play and watch for what different opponents dislike.",
    },
    DimensionMeta {
        key: "match_result",
        name: "Match results",
        group: MATCH_PLAY,
        advantage_tip: "Your results are strong; enter higher-level events to test and stretch your game.",
        improvement_tip: "Play more competitive matches to learn to keep your strokes together under pressure.",
    },
    DimensionMeta {
        key: "training",
        name: "Training background",
        group: MATCH_PLAY,
        advantage_tip: "Your training volume is a solid base; make sessions more targeted to keep improving.",
        improvement_tip: "Raise training frequency and give each session a concrete goal aimed at your weakest areas.",
    },
];

/// Metadata for a dimension key, if it is one of the canonical ones.
pub fn meta(key: &str) -> Option<&'static DimensionMeta> {
    DIMENSIONS.iter().find(|d| d.key == key)
}

/// Display name, falling back to the raw key for unknown dimensions.
pub fn display_name(key: &str) -> &str {
    meta(key).map(|m| m.name).unwrap_or(key)
}

pub fn advantage_tip(key: &str) -> &'static str {
    meta(key)
        .map(|m| m.advantage_tip)
        .unwrap_or(GENERIC_ADVANTAGE_TIP)
}

pub fn improvement_tip(key: &str) -> &'static str {
    meta(key)
        .map(|m| m.improvement_tip)
        .unwrap_or(GENERIC_IMPROVEMENT_TIP)
}

/// Order `keys` canonically: known dimensions in table order, then unknown
/// ones lexicographically. Input order never leaks into the result.
pub fn canonical_order<'a, I>(keys: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut keys: Vec<&str> = keys.into_iter().collect();
    keys.sort_by(|a, b| rank(a).cmp(&rank(b)).then_with(|| a.cmp(b)));
    keys.dedup();
    keys
}

fn rank(key: &str) -> usize {
    DIMENSIONS
        .iter()
        .position(|d| d.key == key)
        .unwrap_or(DIMENSIONS.len())
}
