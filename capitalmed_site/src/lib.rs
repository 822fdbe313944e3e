// capitalmed_site: site features that sit around the campus map.
//
// None of this touches the navigation state directly; the command palette
// links to the map by href, and the chat widget only answers questions.
//
// Module overview:
// - `search.rs`: Command-palette page/doctor index, scoring and ranking.
// - `store.rs`:  KeyValueStore backends, recent searches and CMS blocks.
// - `chat.rs`:   Keyword chat responder and the chat session with its
//                simulated typing delay.

pub mod chat;
pub mod search;
pub mod store;
