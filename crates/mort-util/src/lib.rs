// upper bound of a bounded repetition, {low,} leaves it open
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeUInt {
    Finite(u32),
    Infinite,
}

impl RangeUInt {
    pub fn admits(self, count: u32) -> bool {
        match self {
            RangeUInt::Finite(high) => count <= high,
            RangeUInt::Infinite => true,
        }
    }
}

#[macro_export]
macro_rules! make_type_idx {
    ($vis:vis $type_idx_name:ident, $type_name:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $type_idx_name(u32);

        impl $type_idx_name {
            $vis fn from_push(vec: &mut Vec<$type_name>, val: $type_name) -> $type_idx_name {
                let idx = $type_idx_name(vec.len() as u32);
                vec.push(val);
                idx
            }

            $vis fn index(self) -> usize {
                self.0 as usize
            }

            // shift an index taken from one arena when that arena is appended to another
            $vis fn rebase(self, offset: usize) -> $type_idx_name {
                $type_idx_name(self.0 + offset as u32)
            }
        }

        impl std::ops::Index<$type_idx_name> for [$type_name] {
            type Output = $type_name;

            fn index(&self, index: $type_idx_name) -> &Self::Output {
                &self[index.0 as usize]
            }
        }

        impl std::ops::IndexMut<$type_idx_name> for [$type_name] {
            fn index_mut(&mut self, index: $type_idx_name) -> &mut Self::Output {
                &mut self[index.0 as usize]
            }
        }

        impl std::ops::Index<$type_idx_name> for Vec<$type_name> {
            type Output = $type_name;

            fn index(&self, index: $type_idx_name) -> &Self::Output {
                &self.as_slice()[index]
            }
        }

        impl std::ops::IndexMut<$type_idx_name> for Vec<$type_name> {
            fn index_mut(&mut self, index: $type_idx_name) -> &mut Self::Output {
                &mut self.as_mut_slice()[index]
            }
        }
    };
}
