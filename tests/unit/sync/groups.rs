use super::*;

fn sorted(members: SmallVec<[u32; 8]>) -> Vec<u32> {
    let mut v: Vec<u32> = members.into_vec();
    v.sort_unstable();
    v
}

#[test]
fn chained_syncs_merge_into_one_set() {
    let mut groups = SyncGroups::new();
    groups.sync(&[1_u32, 2]);
    groups.sync(&[2, 3]);
    assert_eq!(sorted(groups.members(1)), vec![1, 2, 3]);
    assert_eq!(sorted(groups.members(3)), vec![1, 2, 3]);
}

#[test]
fn sets_stay_a_true_partition() {
    let mut groups = SyncGroups::new();
    groups.sync(&[1_u32, 2]);
    groups.sync(&[3, 4]);
    groups.sync(&[5, 6]);
    // Bridging two sets merges them and leaves the third untouched.
    groups.sync(&[2, 3]);
    assert_eq!(sorted(groups.members(4)), vec![1, 2, 3, 4]);
    assert_eq!(sorted(groups.members(5)), vec![5, 6]);

    // No instance ever appears in two sets.
    for k in 1..=6 {
        let containing = [groups.members(1), groups.members(5)]
            .iter()
            .filter(|set| set.contains(&k))
            .count();
        assert_eq!(containing, 1, "key {k}");
    }
}

#[test]
fn unknown_instances_degrade_to_singletons() {
    let mut groups: SyncGroups<u32> = SyncGroups::new();
    assert_eq!(sorted(groups.members(42)), vec![42]);
}

#[test]
fn removal_prunes_exactly_one_member() {
    let mut groups = SyncGroups::new();
    groups.sync(&[1_u32, 2, 3]);
    groups.remove(2);
    assert_eq!(sorted(groups.members(1)), vec![1, 3]);
    // A removed key acts like it was never registered.
    assert_eq!(sorted(groups.members(2)), vec![2]);
    // Removing twice is a no-op.
    groups.remove(2);
    assert_eq!(sorted(groups.members(1)), vec![1, 3]);
}

#[test]
fn syncing_an_empty_slice_is_a_no_op() {
    let mut groups: SyncGroups<u32> = SyncGroups::new();
    groups.sync(&[]);
    assert_eq!(sorted(groups.members(1)), vec![1]);
}
