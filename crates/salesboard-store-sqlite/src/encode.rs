//! Row ↔ [`Sale`] mapping.

use chrono::NaiveDate;
use rusqlite::Row;
use salesboard_core::sale::Sale;

use crate::Error;

/// Column list shared by every statement that touches full records. The
/// order must match [`RawSale::from_row`].
pub const SALE_COLUMNS: &str = "transaction_id, sale_date, customer_id, \
   customer_name, phone_number, gender, age, customer_region, customer_type, \
   product_id, product_name, brand, product_category, tags, quantity, \
   price_per_unit, discount_percentage, total_amount, final_amount, \
   payment_method, order_status, delivery_type, store_id, store_location, \
   salesperson_id, employee_name";

/// Number of columns in [`SALE_COLUMNS`].
pub const SALE_COLUMN_COUNT: usize = 26;

/// Intermediate row shape; the date stays a string until decoded outside
/// the rusqlite callback.
pub struct RawSale {
  transaction_id:      String,
  sale_date:           String,
  customer_id:         String,
  customer_name:       String,
  phone_number:        String,
  gender:              String,
  age:                 u32,
  customer_region:     String,
  customer_type:       String,
  product_id:          String,
  product_name:        String,
  brand:               String,
  product_category:    String,
  tags:                String,
  quantity:            i64,
  price_per_unit:      f64,
  discount_percentage: f64,
  total_amount:        f64,
  final_amount:        f64,
  payment_method:      String,
  order_status:        String,
  delivery_type:       String,
  store_id:            String,
  store_location:      String,
  salesperson_id:      String,
  employee_name:       String,
}

impl RawSale {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      transaction_id:      row.get(0)?,
      sale_date:           row.get(1)?,
      customer_id:         row.get(2)?,
      customer_name:       row.get(3)?,
      phone_number:        row.get(4)?,
      gender:              row.get(5)?,
      age:                 row.get(6)?,
      customer_region:     row.get(7)?,
      customer_type:       row.get(8)?,
      product_id:          row.get(9)?,
      product_name:        row.get(10)?,
      brand:               row.get(11)?,
      product_category:    row.get(12)?,
      tags:                row.get(13)?,
      quantity:            row.get(14)?,
      price_per_unit:      row.get(15)?,
      discount_percentage: row.get(16)?,
      total_amount:        row.get(17)?,
      final_amount:        row.get(18)?,
      payment_method:      row.get(19)?,
      order_status:        row.get(20)?,
      delivery_type:       row.get(21)?,
      store_id:            row.get(22)?,
      store_location:      row.get(23)?,
      salesperson_id:      row.get(24)?,
      employee_name:       row.get(25)?,
    })
  }

  pub fn into_sale(self) -> Result<Sale, Error> {
    let date = NaiveDate::parse_from_str(&self.sale_date, "%Y-%m-%d")
      .map_err(|e| Error::DateParse(format!("{:?}: {e}", self.sale_date)))?;
    Ok(Sale {
      transaction_id:      self.transaction_id,
      date,
      customer_id:         self.customer_id,
      customer_name:       self.customer_name,
      phone_number:        self.phone_number,
      gender:              self.gender,
      age:                 self.age,
      customer_region:     self.customer_region,
      customer_type:       self.customer_type,
      product_id:          self.product_id,
      product_name:        self.product_name,
      brand:               self.brand,
      product_category:    self.product_category,
      tags:                self.tags,
      quantity:            self.quantity,
      price_per_unit:      self.price_per_unit,
      discount_percentage: self.discount_percentage,
      total_amount:        self.total_amount,
      final_amount:        self.final_amount,
      payment_method:      self.payment_method,
      order_status:        self.order_status,
      delivery_type:       self.delivery_type,
      store_id:            self.store_id,
      store_location:      self.store_location,
      salesperson_id:      self.salesperson_id,
      employee_name:       self.employee_name,
    })
  }
}
