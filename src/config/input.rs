//! Key binding options for superfile
//!
//! Read from the `[keys]` table of superfile.toml. Each action takes a list of key
//! names, see [crate::app::keymap::parse_key].

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Keys {
    up: Vec<String>,
    down: Vec<String>,
    left: Vec<String>,
    right: Vec<String>,
    enter: Vec<String>,
    tab: Vec<String>,
    search: Vec<String>,
    toggle_hidden: Vec<String>,
    sort: Vec<String>,
    refresh: Vec<String>,
    favorite: Vec<String>,
    quit: Vec<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    up,
    down,
    left,
    right,
    enter,
    tab,
    search,
    toggle_hidden,
    sort,
    refresh,
    favorite,
    quit,
);

impl Default for Keys {
    fn default() -> Self {
        Keys {
            up: vec!["Up".into(), "k".into()],
            down: vec!["Down".into(), "j".into()],
            left: vec!["Left".into()],
            right: vec!["Right".into(), "space".into()],
            enter: vec!["Enter".into()],
            tab: vec!["Tab".into()],
            search: vec!["/".into()],
            toggle_hidden: vec!["h".into()],
            sort: vec!["s".into()],
            refresh: vec!["r".into()],
            favorite: vec!["f".into()],
            quit: vec!["q".into()],
        }
    }
}
