//! Built-in default key sets.

use super::{Catalog, CategoryDef, CategoryId};

/// Category table: id, machine name, keys in display order.
const BUILTIN: &[(CategoryId, &str, &[&str])] = &[
    (
        CategoryId::SMILEYS_EMOTION,
        "smileys_emotion",
        &[
            "😀", "😃", "😄", "😁", "😆", "😅", "🤣", "😂", "🙂", "🙃", "😉", "😊", "😇", "🥰",
            "😍", "🤩", "😘", "😗", "😋", "😛", "😜", "🤪", "😝", "🤑", "🤗", "🤭", "🤫", "🤔",
            "🤐", "🤨", "😐", "😑", "😶", "😏", "😒", "🙄", "😬", "😌", "😔", "😪", "🤤", "😴",
            "😷", "🤒", "🤕", "🤢", "🤮", "🥵", "🥶", "😎", "🤓", "😕", "😟", "😮", "😲", "😳",
            "🥺", "😢", "😭", "😱", "😡", "😠", "🤬", "💀", "💩", "🤡", "👻", "👽", "🤖", "❤️",
        ],
    ),
    (
        CategoryId::PEOPLE_BODY,
        "people_body",
        &[
            "👋", "🤚", "✋", "🖖", "👌", "🤌", "✌️", "🤞", "🤟", "🤘", "🤙", "👈", "👉", "👆",
            "👇", "👍", "👎", "✊", "👊", "👏", "🙌", "👐", "🙏", "💪", "👀", "👶", "🧒", "👦",
            "👧", "🧑", "👨", "👩", "🧓", "👴", "👵", "🙋", "🤷", "🤦", "💃", "🕺",
        ],
    ),
    (
        CategoryId::ANIMALS_NATURE,
        "animals_nature",
        &[
            "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮", "🐷", "🐸",
            "🐵", "🐔", "🐧", "🐦", "🦆", "🦉", "🐺", "🐴", "🦄", "🐝", "🦋", "🐢", "🐍", "🐙",
            "🐬", "🐳", "🌵", "🌲", "🌴", "🌱", "🍀", "🍁", "🌸", "🌹", "🌻", "🌞", "🌙", "⭐",
        ],
    ),
    (
        CategoryId::FOOD_DRINK,
        "food_drink",
        &[
            "🍏", "🍎", "🍐", "🍊", "🍋", "🍌", "🍉", "🍇", "🍓", "🍒", "🍑", "🥭", "🍍", "🥥",
            "🥝", "🍅", "🥑", "🥦", "🌽", "🥕", "🍞", "🧀", "🍳", "🥓", "🍔", "🍟", "🍕", "🌭",
            "🌮", "🍣", "🍜", "🍩", "🍪", "🎂", "🍫", "☕", "🍵", "🍺", "🍷", "🥤",
        ],
    ),
    (
        CategoryId::TRAVEL_PLACES,
        "travel_places",
        &[
            "🚗", "🚕", "🚌", "🏎️", "🚓", "🚑", "🚒", "🚲", "🛵", "🚂", "✈️", "🚀", "🛸", "🚁",
            "⛵", "🚢", "🏠", "🏢", "🏰", "🗼", "🗽", "⛲", "🌋", "🏝️", "🌈",
        ],
    ),
    (
        CategoryId::ACTIVITIES,
        "activities",
        &[
            "⚽", "🏀", "🏈", "⚾", "🎾", "🏐", "🏉", "🎱", "🏓", "🏸", "🥊", "⛳", "🎣", "🎽",
            "🎿", "🏆", "🥇", "🎮", "🎲", "🧩", "🎨", "🎭", "🎤", "🎧", "🎸", "🎹", "🎉", "🎁",
        ],
    ),
    (
        CategoryId::OBJECTS,
        "objects",
        &[
            "⌚", "📱", "💻", "⌨️", "🖥️", "🖨️", "📷", "🎥", "📺", "📻", "⏰", "🔋", "🔌", "💡",
            "🔦", "💰", "💳", "🔧", "🔨", "🔑", "🔒", "📦", "✉️", "📎", "✂️", "📌", "📚", "✏️",
        ],
    ),
    (
        CategoryId::SYMBOLS,
        "symbols",
        &[
            "🧡", "💛", "💚", "💙", "💜", "🖤", "💔", "💯", "✅", "❌", "❓", "❗", "⚠️", "🚫",
            "♻️", "🔴", "🟢", "🔵", "⬆️", "⬇️", "➡️", "⬅️", "🔁", "➕", "➖", "✔️", "©️", "®️",
        ],
    ),
    (
        CategoryId::FLAGS,
        "flags",
        &[
            "🏁", "🚩", "🏳️", "🏴", "🏳️‍🌈", "🇩🇪", "🇫🇷", "🇬🇧", "🇺🇸", "🇯🇵", "🇮🇹", "🇪🇸", "🇧🇷", "🇮🇳",
        ],
    ),
    (
        CategoryId::EMOTICONS,
        "emoticons",
        &[
            ":-)", ";-)", ":-(", ":-D", ":-P", ":-O", ":-*", ":'(", "<3", "¯\\_(ツ)_/¯", "(╯°□°）╯︵ ┻━┻",
        ],
    ),
];

/// Build the default catalog from [`BUILTIN`].
pub(super) fn catalog() -> Catalog {
    Catalog {
        categories: BUILTIN
            .iter()
            .map(|(id, name, keys)| CategoryDef {
                id: *id,
                name: (*name).to_string(),
                keys: keys.iter().map(|k| (*k).to_string()).collect(),
            })
            .collect(),
    }
}
