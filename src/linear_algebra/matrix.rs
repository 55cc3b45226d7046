use std::{borrow::Borrow, fmt::Debug};
use thiserror::Error;

#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum MatrixError {
    #[error("Attempted to combine or compare two vectors that have different {len1} and {len2} length")]
    VectorLenUnmatch{len1:usize,len2:usize},
    #[error("Matrix size is:{matrix_size:?},but index at {accessed_index:?} was accessed")]
    IndexOutOfBounds{matrix_size:(usize,usize),accessed_index:(usize,usize)},
    #[error("Matrix have {row_count} rows ,but row at {accessed_row} was accessed")]
    RowOutOfBounds{row_count:usize,accessed_row:usize},
    #[error("Matrix1 size is:{matrix_size1:?},matrix2 size is {matrix_size2:?}, there's mismatch")]
    DimensionMismatch{matrix_size1:(usize,usize),matrix_size2:(usize,usize)},
    #[error("attempted to create {row}*{col} matrix from vector/iterator with length {len}")]
    SizeMisMatch{row:usize,col:usize,len:usize},
}

pub type Result<T> = std::result::Result<T,MatrixError>;

// element-wise helpers over integer rows and vectors
pub trait AsVector {
    fn as_vector(&self) -> &[i64];
    fn len(&self) -> usize {
        self.as_vector().len()
    }
    fn iter(&self) -> impl Iterator<Item = i64> {
        self.as_vector().iter().copied()
    }
    // true iff every element is <= its counterpart in rhs
    fn try_le<Rhs:AsVector + ?Sized>(&self,rhs:&Rhs) -> Result<bool> {
        if self.len() != rhs.len() {
            return Err(MatrixError::VectorLenUnmatch { len1: self.len(), len2: rhs.len() })
        }
        Ok(self.iter().zip(rhs.iter()).all(|(a,b)| a <= b))
    }
}

impl<T:AsRef<[i64]> + ?Sized> AsVector for T {
    fn as_vector(&self) -> &[i64] {
        self.as_ref()
    }
}

pub trait AsMutVector : AsVector {
    fn as_mut_vector(&mut self) -> &mut [i64];
    fn iter_mut(&mut self) -> impl Iterator<Item = &mut i64> {
        self.as_mut_vector().iter_mut()
    }
    fn try_add_assign<Rhs:AsVector + ?Sized>(&mut self,rhs:&Rhs) -> Result<()> {
        if self.len() != rhs.len() {
            return Err(MatrixError::VectorLenUnmatch { len1: self.len(), len2: rhs.len() })
        }
        for (left,right) in self.iter_mut().zip(rhs.iter()) {
            *left += right;
        }
        Ok(())
    }
    fn try_sub_assign<Rhs:AsVector + ?Sized>(&mut self,rhs:&Rhs) -> Result<()> {
        if self.len() != rhs.len() {
            return Err(MatrixError::VectorLenUnmatch { len1: self.len(), len2: rhs.len() })
        }
        for (left,right) in self.iter_mut().zip(rhs.iter()) {
            *left -= right;
        }
        Ok(())
    }
}

impl<T:AsMut<[i64]> + AsVector + ?Sized> AsMutVector for T {
    fn as_mut_vector(&mut self) -> &mut [i64] {
        self.as_mut()
    }
}

// An integer matrix, row major order
// which means rows are stored continuously
// a matrix may have rows but no columns, row_count is kept in that case
#[derive(Clone,Debug,PartialEq,Eq,Default)]
pub struct Matrix {
    row_count:usize,
    col_count:usize,
    //row*col must equal elements.len()
    // otherwise invariants are broken, panics allowed
    elements:Vec<i64>
}

//public implementations
impl Matrix {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn new_with_vec(v:Vec<i64>,row:usize,col:usize) -> Result<Self> {
        if row*col != v.len() {
            return Err(MatrixError::SizeMisMatch { row, col,len: v.len() })
        }
        Ok(Self { row_count: row, col_count: col, elements: v })
    }
    pub fn from_rows<R:AsRef<[i64]>>(rows:&[R]) -> Result<Self> {
        let col = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut elements = Vec::with_capacity(rows.len()*col);
        for row in rows {
            let row = row.as_ref();
            if row.len() != col {
                return Err(MatrixError::VectorLenUnmatch { len1: col, len2: row.len() })
            }
            elements.extend_from_slice(row);
        }
        Self::new_with_vec(elements, rows.len(), col)
    }
    pub fn filled(row:usize,col:usize,value:i64) -> Self {
        Self {
            row_count:row,
            col_count:col,
            elements:vec![value;row*col]
        }
    }
    pub fn zeros(row:usize,col:usize) -> Self {
        Self::filled(row, col, 0)
    }
    pub fn get_mut(&mut self,row:usize,col:usize) -> Result<&mut i64> {
        debug_assert_eq!(self.row_count*self.col_count,self.elements.len());
        let out_of_bounds = MatrixError::IndexOutOfBounds { matrix_size:
            (self.row_count,self.col_count),
            accessed_index: (row,col)
        };
        if row >= self.row_count || col >= self.col_count {
            return Err(out_of_bounds)
        }
        self.elements.get_mut(row*self.col_count + col).ok_or(out_of_bounds)
    }
    pub fn set(&mut self,row:usize,col:usize,value:i64) -> Result<()> {
        *self.get_mut(row, col)? = value;
        Ok(())
    }
    pub fn row(&self,row:usize) -> Result<&[i64]> {
        if row >= self.row_count {
            return Err(MatrixError::RowOutOfBounds { row_count: self.row_count, accessed_row: row })
        }
        let start = row*self.col_count;
        Ok(&self.elements[start..start + self.col_count])
    }
    pub fn rows(&self) -> impl Iterator<Item = &[i64]> {
        // chunks() rejects a zero chunk size
        (0..self.row_count).map(|row| {
            let start = row*self.col_count;
            &self.elements[start..start + self.col_count]
        })
    }
    pub fn row_count(&self) -> usize {
        self.row_count
    }
    pub fn col_count(&self) -> usize {
        self.col_count
    }
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
    pub fn dimension(&self) -> (usize,usize) {
        (self.row_count,self.col_count)
    }
    // element-wise self - rhs
    pub fn try_sub<B:Borrow<Matrix>>(&self,rhs:B) -> Result<Self> {
        let rhs = rhs.borrow();
        if self.dimension() != rhs.dimension() {
            return Err(MatrixError::DimensionMismatch {
                matrix_size1: self.dimension(),
                matrix_size2: rhs.dimension() })
        }
        let mut difference = self.clone();
        difference.elements.try_sub_assign(&rhs.elements)?;
        Ok(difference)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::{AsMutVector, AsVector, Matrix, MatrixError};

    #[test]
    fn test_filled() {
        let ones = Matrix::filled(3, 4, 1);
        for i in 0..3 {
            for j in 0..4 {
                assert_eq!(ones.row(i).unwrap()[j],1,"index at ({i},{j} failed to match)")
            }
        }
        let mut ones = ones;
        assert_eq!(ones.set(3, 0, 2),Err(MatrixError::IndexOutOfBounds { matrix_size: (3,4), accessed_index: (3,0) }));
    }
    #[test]
    fn test_rows_without_columns() {
        let m = Matrix::zeros(3, 0);
        assert!(m.is_empty());
        assert_eq!(m.dimension(),(3,0));
        assert_eq!(m.rows().count(),3);
        assert!(m.row(2).unwrap().is_empty());
        assert!(m.row(3).is_err());
    }
    #[test]
    fn test_sub_random() {
        let mut rng = rand::rng();
        let row:usize = rng.random_range(1..20);
        let col:usize = rng.random_range(1..20);
        let a:Vec<i64> = (0..row*col).map(|_| rng.random_range(-5..5)).collect();
        let b:Vec<i64> = (0..row*col).map(|_| rng.random_range(-5..5)).collect();
        let ma = Matrix::new_with_vec(a.clone(), row, col).unwrap();
        let mb = Matrix::new_with_vec(b.clone(), row, col).unwrap();
        let diff = ma.try_sub(&mb).unwrap();
        for i in 0..row {
            for j in 0..col {
                assert_eq!(diff.row(i).unwrap()[j],a[i*col + j] - b[i*col + j],"index:({i},{j})")
            }
        }
        assert!(ma.try_sub(Matrix::zeros(col + 1, row)).is_err());
    }
    #[test]
    fn test_from_rows() {
        let m = Matrix::from_rows(&[[1i64,0,2],[0,1,1]]).unwrap();
        assert_eq!(m.dimension(),(2,3));
        assert_eq!(m.row(1).unwrap(),&[0,1,1]);
        assert!(Matrix::from_rows(&[vec![1i64,2],vec![1]]).is_err());
    }
    #[test]
    fn test_vector_helpers() {
        let mut work:Vec<i64> = vec![1,2,3];
        assert!([1i64,2,3].try_le(&work).unwrap());
        assert!(![1i64,3,0].try_le(&work).unwrap());
        assert!([1i64].try_le(&work).is_err());
        work.try_add_assign(&[1i64,1,1]).unwrap();
        assert_eq!(work,vec![2,3,4]);
        work.try_sub_assign(&[2i64,3,4]).unwrap();
        assert_eq!(work,vec![0,0,0]);
    }
}
