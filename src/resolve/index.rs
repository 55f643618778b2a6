use crate::config::types::{NamedEntry, RawConfig};
use std::collections::HashMap;

/// Name-keyed view over one section of a kubeconfig.
///
/// Values are `None` when the entry exists but its body is absent.
pub type NameIndex<'a, T> = HashMap<&'a str, Option<&'a T>>;

/// Index a section by entry name.
///
/// Entries are inserted in file order, so when a name repeats the later entry
/// replaces the earlier one.
pub fn index_by_name<E: NamedEntry>(entries: &[E]) -> NameIndex<'_, E::Body> {
	let mut index = HashMap::with_capacity(entries.len());
	for entry in entries {
		if index.insert(entry.name(), entry.body()).is_some() {
			log::debug!("duplicate entry {:?}, later definition wins", entry.name());
		}
	}
	index
}

/// Look up a name whose entry must exist and carry a body.
pub fn lookup<'a, T>(index: &NameIndex<'a, T>, name: &str) -> Option<&'a T> {
	index.get(name).copied().flatten()
}

/// One context as shown by `kubeconn contexts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSummary {
	pub name: String,

	/// `None` when the context body is absent.
	pub cluster: Option<String>,

	pub user: Option<String>,

	/// True for the context named by `current-context`.
	pub current: bool,
}

/// List the contexts a lookup would actually see.
///
/// Duplicate names appear once, at the position of their last definition.
pub fn list_contexts(config: &RawConfig) -> Vec<ContextSummary> {
	let last_position: HashMap<&str, usize> = config
		.contexts
		.iter()
		.enumerate()
		.map(|(i, entry)| (entry.name(), i))
		.collect();

	config
		.contexts
		.iter()
		.enumerate()
		.filter(|(i, entry)| last_position.get(entry.name()) == Some(i))
		.map(|(_, entry)| ContextSummary {
			name: entry.name.clone(),
			cluster: entry.body().map(|c| c.cluster.clone()),
			user: entry
				.body()
				.map(|c| c.auth_info.clone())
				.filter(|u| !u.is_empty()),
			current: entry.name == config.current_context,
		})
		.collect()
}
