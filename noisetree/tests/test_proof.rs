use noisetree::{
    config::{Config, NodeEncoding},
    merkletree::{check, derive_path, proof::Side},
    utils::hasher,
    verify_proof, verify_proof_with, InclusionProof, Trie, TrieError,
};

fn build_trie(values: &[String]) -> Trie {
    let mut trie = Trie::new();
    for v in values {
        trie.insert(v).unwrap();
    }
    trie
}

fn stress_values(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("stress_{}", i)).collect()
}

/// Finds two candidates whose routing bits agree on at least `min_shared` levels.
fn find_shared_prefix_pair(min_shared: usize) -> (String, String, usize) {
    let candidates: Vec<String> = (0..2000).map(|i| format!("cascade-{}", i)).collect();
    let paths: Vec<_> = candidates
        .iter()
        .map(|c| derive_path(c, 256).unwrap())
        .collect();
    for i in 0..candidates.len() {
        for j in i + 1..candidates.len() {
            if let Some(split) = paths[i].divergence(&paths[j], 0) {
                if split >= min_shared {
                    return (candidates[i].clone(), candidates[j].clone(), split);
                }
            }
        }
    }
    panic!("no pair shares {} routing bits", min_shared);
}

#[test]
fn test_single_leaf_root_is_leaf_hash() {
    let mut trie = Trie::new();
    trie.insert("leaf1").unwrap();
    assert_eq!(trie.root(), Some(hasher::hash(b"leaf1")));
    let proof = trie.get_proof("leaf1").unwrap();
    assert!(proof.is_empty());
    assert!(verify_proof("leaf1", &proof, &trie.root().unwrap()));
}

#[test]
fn test_two_leaves_split_at_root() {
    let first = derive_path("leaf1", 256).unwrap();
    let other = (2..100)
        .map(|i| format!("leaf{}", i))
        .find(|v| derive_path(v, 256).unwrap().bit(0) != first.bit(0))
        .unwrap();

    let mut trie = Trie::new();
    trie.insert("leaf1").unwrap();
    trie.insert(&other).unwrap();

    let h1 = hasher::hash(b"leaf1");
    let h2 = hasher::hash(other.as_bytes());
    let (left, right) = if first.bit(0) == 0 { (h1, h2) } else { (h2, h1) };
    let joined = format!("{}{}", hex::encode(left), hex::encode(right));
    let root = trie.root().unwrap();
    assert_eq!(root, hasher::hash(joined));

    let proof = trie.get_proof("leaf1").unwrap();
    assert_eq!(proof.len(), 1);
    assert_eq!(proof.steps()[0].sibling, h2);
    let expected_side = if first.bit(0) == 0 {
        Side::Right
    } else {
        Side::Left
    };
    assert_eq!(proof.steps()[0].side, expected_side);
    assert!(verify_proof("leaf1", &proof, &root));
}

#[test]
fn test_collision_cascade() {
    let (a, b, split) = find_shared_prefix_pair(4);
    let mut trie = Trie::new();
    trie.insert(&a).unwrap();
    trie.insert(&b).unwrap();
    check::check_hash_consistency(&trie);

    let root = trie.root().unwrap();
    for v in [&a, &b] {
        let proof = trie.get_proof(v).unwrap();
        // one step per level from the root down to the fork
        assert_eq!(proof.len(), split + 1);
        assert!(verify_proof(v, &proof, &root));
    }

    // above the fork every sibling is the lone child's own hash
    let proof = trie.get_proof(&a).unwrap();
    let fork_hash = proof.steps()[..1]
        .iter()
        .fold(hasher::hash(a.as_bytes()), |h, s| s.apply(NodeEncoding::Hex, &h));
    assert_eq!(proof.steps()[1].sibling, fork_hash);
}

#[test]
fn test_missing_value() {
    let trie = build_trie(&stress_values(20));
    assert_eq!(
        trie.get_proof("never_inserted"),
        Err(TrieError::ValueNotFound)
    );
    for ghost in ["ghost_leaf", "fake_leaf", ""] {
        assert_eq!(trie.get_proof(ghost), Err(TrieError::ValueNotFound));
    }
}

#[test]
fn test_empty_tree() {
    let trie = Trie::new();
    assert_eq!(trie.get_proof("anything"), Err(TrieError::EmptyTree));
}

#[test]
fn test_tampered_proof() {
    let values = stress_values(30);
    let trie = build_trie(&values);
    let root = trie.root().unwrap();
    let mut proof = trie.get_proof(&values[7]).unwrap();
    assert!(verify_proof(&values[7], &proof, &root));

    for i in 0..proof.len() {
        let mut tampered = proof.clone();
        tampered.steps_mut()[i].sibling[0] ^= 0x01;
        assert!(!verify_proof(&values[7], &tampered, &root));
    }

    let mut tampered_root = root;
    tampered_root[31] ^= 0x80;
    assert!(!verify_proof(&values[7], &proof, &tampered_root));

    let last = proof.len() - 1;
    let steps = proof.steps_mut();
    steps[last].side = match steps[last].side {
        Side::Left => Side::Right,
        Side::Right => Side::Left,
    };
    assert!(!verify_proof(&values[7], &proof, &root));
}

#[test]
fn test_proofs_survive_later_inserts() {
    let values = stress_values(100);
    let mut trie = Trie::new();
    for (i, v) in values.iter().enumerate() {
        trie.insert(v).unwrap();
        let root = trie.root().unwrap();
        assert!(verify_proof(v, &trie.get_proof(v).unwrap(), &root));
        // earlier values, re-fetched against the new root
        for earlier in values[..i].iter().step_by(9) {
            assert!(verify_proof(earlier, &trie.get_proof(earlier).unwrap(), &root));
        }
    }
    check::check_hash_consistency(&trie);
}

#[test]
fn test_old_proof_verifies_against_old_root() {
    let values = stress_values(10);
    let mut trie = build_trie(&values[..5]);
    let old_root = trie.root().unwrap();
    let old_proof = trie.get_proof(&values[2]).unwrap();

    for v in &values[5..] {
        trie.insert(v).unwrap();
    }
    assert_ne!(trie.root().unwrap(), old_root);
    assert!(verify_proof(&values[2], &old_proof, &old_root));
}

#[test]
fn test_idempotent_insert() {
    let values = stress_values(40);
    let mut trie = build_trie(&values);
    let root = trie.root();
    let proofs: Vec<InclusionProof> = values.iter().map(|v| trie.get_proof(v).unwrap()).collect();

    assert_eq!(trie.insert(&values[13]), Ok(false));
    assert_eq!(trie.root(), root);
    for (v, proof) in values.iter().zip(&proofs) {
        assert_eq!(&trie.get_proof(v).unwrap(), proof);
    }
    assert_eq!(trie.len(), 40);
}

#[test]
fn test_new_value_changes_root() {
    let mut trie = Trie::new();
    let mut roots = Vec::new();
    for v in stress_values(50) {
        trie.insert(&v).unwrap();
        let root = trie.root().unwrap();
        assert!(!roots.contains(&root));
        roots.push(root);
    }
}

#[test]
fn test_deterministic_roots_and_proofs() {
    let values = stress_values(64);
    let a = build_trie(&values);
    let b = build_trie(&values);
    assert_eq!(a.root(), b.root());
    for v in &values {
        assert_eq!(a.get_proof(v).unwrap(), b.get_proof(v).unwrap());
    }
}

#[test]
fn test_cross_verification_from_wire() {
    let values = stress_values(25);
    let root_hex;
    let proof_json;
    let proof_bytes;
    {
        let trie = build_trie(&values);
        root_hex = trie.root_hex().unwrap();
        let proof = trie.get_proof(&values[11]).unwrap();
        proof_json = proof.to_json();
        proof_bytes = proof.to_bytes();
    }

    // no trie in scope from here on
    let root = hasher::hash_from_hex(&root_hex).unwrap();
    let from_json = InclusionProof::from_json(&proof_json).unwrap();
    let from_bytes = InclusionProof::from_bytes(&proof_bytes).unwrap();
    assert_eq!(from_json, from_bytes);
    assert!(verify_proof(&values[11], &from_json, &root));
    assert!(!verify_proof(&values[12], &from_json, &root));
}

#[test]
fn test_raw_encoding() {
    let values = stress_values(30);
    let mut raw = Trie::with_config(Config::new(256, NodeEncoding::Raw)).unwrap();
    for v in &values {
        raw.insert(v).unwrap();
    }
    let hex_trie = build_trie(&values);
    assert_ne!(raw.root(), hex_trie.root());
    check::check_hash_consistency(&raw);

    let root = raw.root().unwrap();
    for v in &values {
        let proof = raw.get_proof(v).unwrap();
        // same shape, different hashes
        assert_eq!(proof.len(), hex_trie.get_proof(v).unwrap().len());
        assert!(verify_proof_with(NodeEncoding::Raw, v, &proof, &root));
        assert!(!verify_proof_with(NodeEncoding::Hex, v, &proof, &root));
    }
}

#[test]
fn test_shallow_trie() {
    let mut trie = Trie::with_config(Config::from_depth(12)).unwrap();
    let mut inserted = Vec::new();
    for i in 0..300 {
        let v = format!("shallow-{}", i);
        match trie.insert(&v) {
            Ok(_) => inserted.push(v),
            Err(e) => assert_eq!(e, TrieError::PathExhausted { depth: 12 }),
        }
    }
    check::check_hash_consistency(&trie);
    let root = trie.root().unwrap();
    for v in &inserted {
        let proof = trie.get_proof(v).unwrap();
        assert!(proof.len() <= 12);
        assert!(verify_proof(v, &proof, &root));
    }
}
