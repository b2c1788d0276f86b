mod house_number;
