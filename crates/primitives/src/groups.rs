use smallvec::SmallVec;

/// Selects which groups of a per-group table an operation touches.
///
/// Operations that are not explicitly restricted use [`Groups::All`], which is
/// what keeps every group of a kind at the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Groups {
	/// Every group of the kind.
	#[default]
	All,
	/// Only the listed group indices. Out-of-range indices are ignored.
	Only(SmallVec<[usize; 4]>),
}

impl Groups {
	/// Restricts to the given group indices.
	pub fn only(indices: impl IntoIterator<Item = usize>) -> Self {
		Self::Only(indices.into_iter().collect())
	}

	/// Returns true if `group` is selected.
	#[inline]
	pub fn contains(&self, group: usize) -> bool {
		match self {
			Self::All => true,
			Self::Only(list) => list.contains(&group),
		}
	}

	/// Returns true if this selector names every group.
	#[inline]
	pub fn is_all(&self) -> bool {
		matches!(self, Self::All)
	}

	/// Iterates the selected indices among `count` groups, in ascending order.
	pub fn indices(&self, count: usize) -> impl Iterator<Item = usize> + '_ {
		(0..count).filter(move |&group| self.contains(group))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_filters_and_ignores_out_of_range() {
		let groups = Groups::only([2, 0, 9]);
		assert_eq!(groups.indices(4).collect::<Vec<_>>(), vec![0, 2]);
		assert!(!groups.is_all());
	}

	#[test]
	fn all_selects_everything() {
		assert_eq!(Groups::All.indices(3).collect::<Vec<_>>(), vec![0, 1, 2]);
	}
}
