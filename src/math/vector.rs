use std::iter::FromIterator;
use std::ops::{Index, IndexMut};
use std::slice::{Iter, IterMut};

/// Thin 1D container aligned row-for-row with `Array2`.
#[derive(Clone, Debug, PartialEq)]
pub struct Array1<T> {
    data: Vec<T>,
}

impl<T> Array1<T> {
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn mapv<U, F>(&self, mut f: F) -> Array1<U>
    where
        F: FnMut(&T) -> U,
    {
        Array1::from_vec(self.data.iter().map(|v| f(v)).collect())
    }

    pub fn select(&self, indices: &[usize]) -> Array1<T>
    where
        T: Clone,
    {
        let mut selected = Vec::with_capacity(indices.len());
        for &idx in indices {
            selected.push(self.data[idx].clone());
        }
        Array1::from_vec(selected)
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }
}

impl<T> Array1<T>
where
    T: Clone,
{
    pub fn from_elem(len: usize, value: T) -> Self {
        Array1::from_vec(vec![value; len])
    }
}

impl<T> From<Vec<T>> for Array1<T> {
    fn from(value: Vec<T>) -> Self {
        Array1::from_vec(value)
    }
}

impl<T> From<Array1<T>> for Vec<T> {
    fn from(value: Array1<T>) -> Self {
        value.data
    }
}

impl<T> FromIterator<T> for Array1<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Array1::from_vec(iter.into_iter().collect())
    }
}

impl<T> Index<usize> for Array1<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Array1<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}
