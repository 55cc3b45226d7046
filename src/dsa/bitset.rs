// packed bool vector, bit i lives in byte i/8 at position i%8
#[derive(Clone,Debug,Default)]
pub(crate) struct BitSet {
    size:usize,
    bytes:Vec<u8>
}

impl BitSet {
    pub(crate) fn new() -> Self {
        Self {size:0,bytes:vec![]}
    }
    pub(crate) fn with_capacity(capacity:usize) -> Self {
        if capacity == 0 {return Self::new()}
        let vec_capacity = capacity/8 + 1;
        Self {
            size:0,
            bytes:Vec::with_capacity(vec_capacity)
        }
    }
    // len bits, all set to bit
    pub(crate) fn filled(len:usize,bit:bool) -> Self {
        let mut set = Self::with_capacity(len);
        for _ in 0..len {set.push_bit(bit);}
        set
    }
    pub(crate) fn len(&self) -> usize {
        self.size
    }
    pub(crate) fn push_bit(&mut self, bit:bool) {
        let byte_pos = self.size / 8;
        let pos_in_byte = self.size % 8;

        debug_assert!(byte_pos <= self.bytes.len());

        let mask = 1u8 << pos_in_byte;
        if let Some(byte) = self.bytes.get_mut(byte_pos) {
            if bit {
                *byte |= mask;
            }else{
                *byte &= !mask;
            }
        }else{
            self.bytes.push(if bit {mask} else {0})
        }
        self.size += 1;
    }
    pub(crate) fn get_at(&self,index:usize) -> Option<bool> {
        if index >= self.size {return None}
        let byte = self.bytes.get(index / 8)?;
        let mask = 1u8 << (index % 8);
        Some(*byte & mask > 0)
    }
    pub(crate) fn store_at(&mut self,index:usize,bit:bool) -> Option<()> {
        if index >= self.size {return None}
        let byte = self.bytes.get_mut(index / 8)?;
        let mask = 1u8 << (index % 8);
        if bit {
            *byte |= mask;
        }else{
            *byte &= !mask;
        }
        Some(())
    }
    pub(crate) fn count_ones(&self) -> usize {
        (0..self.size).filter(|i| self.get_at(*i) == Some(true)).count()
    }
    pub(crate) fn all(&self) -> bool {
        self.count_ones() == self.size
    }
}

#[cfg(test)]
mod tests{
    use super::BitSet;
    #[test]
    fn test_create() {
        BitSet::new();
        let mut set = BitSet::with_capacity(114514);
        for _ in 0..114514 {set.push_bit(true);}
        assert!(set.get_at(10000).unwrap());
        assert!(set.get_at(114513).unwrap());
        assert!(set.get_at(114514).is_none());
        let bit = false;
        set.store_at(1145, bit).unwrap();
        assert_eq!(set.get_at(1145).unwrap(),bit);
        assert_eq!(set.count_ones(),114513);
    }
    #[test]
    fn test_filled_and_all() {
        let mut set = BitSet::filled(10,false);
        assert_eq!(set.len(),10);
        assert!(!set.all());
        for i in 0..10 {set.store_at(i, true).unwrap();}
        assert!(set.all());
        assert!(BitSet::filled(0,false).all());
    }
    #[test]
    fn test_push_false_after_true() {
        let mut set = BitSet::new();
        set.push_bit(true);
        set.push_bit(false);
        set.push_bit(true);
        assert_eq!(set.get_at(0),Some(true));
        assert_eq!(set.get_at(1),Some(false));
        assert_eq!(set.get_at(2),Some(true));
    }
}
