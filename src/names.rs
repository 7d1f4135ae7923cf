//! Random bookmark group names for `gitbm create` without a name

use rand::seq::IndexedRandom;

const ADJECTIVES: &[&str] = &[
    "amber", "bold", "brisk", "calm", "clever", "cosmic", "dusty", "eager", "fancy", "gentle",
    "hidden", "icy", "jolly", "lucky", "mellow", "misty", "nimble", "quiet", "rapid", "rusty",
    "silent", "sunny", "swift", "tidy", "vivid", "wild",
];

const NOUNS: &[&str] = &[
    "badger", "comet", "falcon", "fjord", "forest", "harbor", "heron", "island", "lantern", "maple",
    "meadow", "otter", "pebble", "pine", "quartz", "raven", "river", "summit", "thistle", "tundra",
    "valley", "willow", "wolf", "zephyr",
];

/// An `adjective-noun` name, e.g. `swift-otter`.
pub fn random_group_name() -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("unnamed");
    let noun = NOUNS.choose(&mut rng).copied().unwrap_or("group");
    format!("{}-{}", adjective, noun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_group_name_shape() {
        for _ in 0..20 {
            let name = random_group_name();
            let (adjective, noun) = name.split_once('-').unwrap();
            assert!(ADJECTIVES.contains(&adjective));
            assert!(NOUNS.contains(&noun));
        }
    }
}
