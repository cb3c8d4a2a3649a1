/// A sorted `Vec` with the unique/multi operations of an ordered tree.
///
/// Every operation is linear. Equal elements keep their insertion order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SortedVec<T>(Vec<T>);

impl<T: Ord> SortedVec<T> {
    pub fn new() -> Self { Self(vec![]) }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn len(&self) -> usize { self.0.len() }

    pub fn lower_bound(&self, key: &T) -> usize {
        self.0.iter().take_while(|x| *x < key).count()
    }
    pub fn upper_bound(&self, key: &T) -> usize {
        self.0.iter().take_while(|x| *x <= key).count()
    }
    pub fn count(&self, key: &T) -> usize {
        self.0.iter().filter(|x| *x == key).count()
    }
    pub fn contains(&self, key: &T) -> bool { self.count(key) > 0 }

    pub fn insert_unique(&mut self, elt: T) -> bool {
        if self.contains(&elt) {
            return false;
        }
        self.insert_multi(elt);
        true
    }
    pub fn insert_multi(&mut self, elt: T) {
        let i = self.upper_bound(&elt);
        self.0.insert(i, elt);
    }

    pub fn erase_unique(&mut self, key: &T) -> usize {
        match self.0.iter().position(|x| x == key) {
            Some(i) => {
                self.0.remove(i);
                1
            }
            None => 0,
        }
    }
    pub fn erase_multi(&mut self, key: &T) -> usize {
        let len = self.0.len();
        self.0.retain(|x| x != key);
        len - self.0.len()
    }
    pub fn erase_nth(&mut self, i: usize) -> T { self.0.remove(i) }

    pub fn get(&self, i: usize) -> Option<&T> { self.0.get(i) }
    pub fn iter(&self) -> std::slice::Iter<'_, T> { self.0.iter() }
}

#[test]
fn sanity_check() {
    let mut a = SortedVec::new();
    assert!(a.insert_unique(3));
    assert!(a.insert_unique(1));
    assert!(!a.insert_unique(3));
    a.insert_multi(3);
    a.insert_multi(2);
    assert!(a.iter().eq(&[1, 2, 3, 3]));
    assert_eq!((a.lower_bound(&3), a.upper_bound(&3)), (2, 4));
    assert_eq!(a.count(&3), 2);
    assert_eq!(a.erase_multi(&3), 2);
    assert_eq!(a.erase_unique(&3), 0);
    assert_eq!(a.erase_unique(&1), 1);
    assert_eq!(a.len(), 1);
}
