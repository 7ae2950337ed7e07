//! Peer Cache Tests

use shepherd_domain::value_objects::PeerHost;
use shepherd_server::PeerCache;

#[test]
fn test_new_cache_is_empty_and_unrefreshed() {
    let cache = PeerCache::new();

    assert!(cache.is_empty());
    assert!(cache.snapshot().refreshed_at.is_none());
}

#[test]
fn test_replace_swaps_listing_and_stamps_time() {
    let cache = PeerCache::new();
    cache.replace(vec![PeerHost::up("peer-a"), PeerHost::up("peer-b")]);
    let first = cache.snapshot();

    cache.replace(vec![PeerHost::up("peer-c")]);
    let second = cache.snapshot();

    assert_eq!(first.hosts.len(), 2);
    assert_eq!(second.hosts, vec![PeerHost::up("peer-c")]);
    assert_eq!(cache.len(), 1);
    assert!(second.refreshed_at >= first.refreshed_at);
}
